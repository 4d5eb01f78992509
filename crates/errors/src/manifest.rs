//! Manifest read/write error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ManifestError {
    /// The manifest file itself could not be opened or read.
    /// Fatal for a verify run; there is no reference data without it.
    #[error("cannot read manifest {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("cannot write manifest {path}: {message}")]
    WriteFailed { path: String, message: String },
}

impl UserFacingError for ManifestError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Unreadable { .. } => {
                Some("Check the manifest path and that it was produced by a generate run.")
            }
            Self::WriteFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Unreadable { .. } => "manifest.unreadable",
            Self::WriteFailed { .. } => "manifest.write_failed",
        };
        Some(code)
    }
}
