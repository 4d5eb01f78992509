use serde::{Deserialize, Serialize};

/// Manifest generation events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerateEvent {
    /// A generate run started; `files` is the walker's total.
    Started {
        root: String,
        algorithm: String,
        files: usize,
    },

    /// One file was hashed and its record written.
    FileHashed { relative_path: String },

    /// One file could not be hashed; the run continues without it.
    FileFailed {
        relative_path: String,
        message: String,
    },

    /// The manifest was written and flushed.
    Completed {
        manifest_path: String,
        files: usize,
        failed: usize,
    },
}
