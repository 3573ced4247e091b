//! Bot credential handling.
//!
//! The token authorises every Bot API call and appears in request paths, so
//! it is zeroised on drop, redacted from `Debug`, and only ever logged as a
//! truncated SHA-256 fingerprint.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Errors raised when accepting a bot token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BotTokenError {
    /// The token was empty or whitespace.
    #[error("bot token must not be blank")]
    Blank,
    /// The token contained characters that cannot appear in a URL path.
    #[error("bot token contains characters outside [A-Za-z0-9:_-]")]
    InvalidCharacters,
}

/// Secret Telegram bot token.
#[derive(Clone)]
pub struct BotToken(Zeroizing<String>);

impl BotToken {
    /// Accept a token, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`BotTokenError`] when the token is blank or not URL-safe.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BotTokenError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BotTokenError::Blank);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-'))
        {
            return Err(BotTokenError::InvalidCharacters);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    pub(super) fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// First 8 bytes of the token's SHA-256 digest as lowercase hex.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl std::fmt::Debug for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BotToken(fingerprint={})", self.fingerprint())
    }
}
