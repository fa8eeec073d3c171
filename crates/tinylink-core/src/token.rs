use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Number of characters in every token.
pub const TOKEN_LENGTH: usize = 6;

/// A fixed-length, URL-safe identifier for a stored long URL.
///
/// Tokens are exactly [`TOKEN_LENGTH`] characters drawn from the RFC 4648
/// URL-safe base64 alphabet (`A-Z`, `a-z`, `0-9`, `-`, `_`).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(SmolStr);

impl Token {
    /// Parses a token from untrusted input such as a request path.
    pub fn parse(token: impl AsRef<str>) -> Result<Self, TokenError> {
        let token = token.as_ref();
        Self::validate(token)?;
        Ok(Self(SmolStr::new(token)))
    }

    /// Creates a `Token` without validation.
    ///
    /// Use this only for tokens produced by a [`Deriver`][crate::Deriver],
    /// which guarantees the length and alphabet.
    pub fn new_unchecked(token: impl AsRef<str>) -> Self {
        Self(SmolStr::new(token))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Composes the short link for this token under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Whether `c` belongs to the URL-safe base64 alphabet.
    pub fn is_token_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }

    fn validate(token: &str) -> Result<(), TokenError> {
        if token.len() != TOKEN_LENGTH {
            return Err(TokenError::Invalid(format!(
                "length must be {}, got {}",
                TOKEN_LENGTH,
                token.len()
            )));
        }

        if !token.chars().all(Self::is_token_char) {
            return Err(TokenError::Invalid(format!(
                "must contain only URL-safe base64 characters: '{}'",
                token
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&self.0).finish()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Token::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_tokens() {
        assert!(Token::parse("abc123").is_ok());
        assert!(Token::parse("A-b_9Z").is_ok());
        assert!(Token::parse("______").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(Token::parse("").is_err());
        assert!(Token::parse("abc12").is_err());
        assert!(Token::parse("unknowntoken123").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(Token::parse("abc de").is_err());
        assert!(Token::parse("abc/de").is_err());
        assert!(Token::parse("abc+de").is_err());
        assert!(Token::parse("abcde=").is_err());
    }

    #[test]
    fn multibyte_input_is_rejected() {
        // six chars, but more than six bytes
        assert!(Token::parse("ééééé1").is_err());
    }

    #[test]
    fn to_url_trims_trailing_slash() {
        let token = Token::parse("abc123").unwrap();
        assert_eq!(token.to_url("https://tiny.link"), "https://tiny.link/abc123");
        assert_eq!(token.to_url("https://tiny.link/"), "https://tiny.link/abc123");
    }

    #[test]
    fn deserialize_validates() {
        let token: Token = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert!(serde_json::from_str::<Token>("\"nope\"").is_err());
    }
}
