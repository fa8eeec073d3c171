use std::sync::Arc;

use tinylink_shortener::Shortener;

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Arc<str>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        let base_url: String = public_base_url.into();
        Self {
            shortener,
            base_url: base_url.into(),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    /// Base URL that short links are composed under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
