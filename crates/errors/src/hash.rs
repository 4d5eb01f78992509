//! Digest and hashing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum HashError {
    /// Requested algorithm is not part of the compiled-in capability set.
    /// Raised before any file I/O begins.
    #[error("unsupported digest algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("invalid digest: {message}")]
    InvalidDigest { message: String },
}

impl UserFacingError for HashError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedAlgorithm { .. } => {
                Some("Supported algorithms: sha256, blake3.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnsupportedAlgorithm { .. } => "hash.unsupported_algorithm",
            Self::InvalidDigest { .. } => "hash.invalid_digest",
        };
        Some(code)
    }
}
