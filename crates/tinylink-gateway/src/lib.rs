//! HTTP gateway for the tinylink URL shortener.
//!
//! Exposes `GET /health`, `POST /shorten` and `GET /{token}` on top of any
//! [`Shortener`][tinylink_shortener::Shortener].

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
