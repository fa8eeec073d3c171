use crate::token::Token;

/// The persisted association between a token and the long URL it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub token: Token,
    pub long_url: String,
}

impl Mapping {
    pub fn new(token: Token, long_url: impl Into<String>) -> Self {
        Self {
            token,
            long_url: long_url.into(),
        }
    }
}
