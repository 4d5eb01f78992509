use serde::{Deserialize, Serialize};

/// Terminal classification of a single manifest record during verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Recomputed digest equals the expected digest.
    Match,
    /// File exists but its content has drifted from the manifest.
    Mismatch,
    /// File referenced by the manifest no longer exists.
    Missing,
    /// File exists but could not be read or hashed.
    Error,
}

impl VerifyOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::Missing => "missing",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate counts captured at the end of a verify run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySummary {
    pub success: usize,
    pub mismatch: usize,
    pub missing: usize,
    pub error: usize,
    pub total: usize,
}

/// Verification events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerifyEvent {
    /// A verify run started; `total` is the manifest record count.
    Started {
        root: String,
        manifest_path: String,
        algorithm: String,
        total: usize,
    },

    /// One manifest record reached a terminal outcome.
    RecordChecked {
        relative_path: String,
        outcome: VerifyOutcome,
    },

    /// The whole manifest was checked.
    Completed { summary: VerifySummary },
}
