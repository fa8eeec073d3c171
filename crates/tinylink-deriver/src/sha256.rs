use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::{Digest, Sha256};
use tinylink_core::{Deriver, Token, TOKEN_LENGTH};

/// Derives tokens from the SHA-256 digest of the long URL.
///
/// The scheme is:
///
/// ```text
/// digest = SHA-256(utf8(long_url))
/// token  = base64url(digest)[..6]
/// ```
///
/// Six base64 characters carry 36 bits of the digest. Two distinct URLs can
/// therefore share a token, in which case the later mapping replaces the
/// earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Deriver;

impl Sha256Deriver {
    pub fn new() -> Self {
        Self
    }
}

impl Deriver for Sha256Deriver {
    fn derive(&self, long_url: &str) -> Token {
        let digest = Sha256::digest(long_url.as_bytes());
        let encoded = URL_SAFE.encode(digest);
        // 32 bytes encode to 44 chars; padding only appears at the very end.
        Token::new_unchecked(&encoded[..TOKEN_LENGTH])
    }
}
