#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Digest manifest format for treesum
//!
//! A manifest is one record per line, `<lowercase-hex-digest><TAB><relative
//! path>`, UTF-8, newline-terminated. Paths are root-relative with forward
//! slashes on every platform. One algorithm covers the whole manifest; it is
//! not stored per record and must be supplied again at verify time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use treesum_errors::{Error, ManifestError};

mod generate;
mod walker;

pub use generate::Generator;
pub use walker::{collect_files, WalkedTree};

/// A single `(relative path, digest)` entry of a manifest.
///
/// The digest is kept as the hex string read from or written to disk; it is
/// only decoded when a comparison needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub relative_path: String,
    pub digest_hex: String,
}

impl ManifestRecord {
    #[must_use]
    pub fn new(relative_path: impl Into<String>, digest_hex: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            digest_hex: digest_hex.into(),
        }
    }
}

/// A parsed manifest together with the number of lines the parser had to
/// skip. Skipped lines are surfaced, never silently dropped.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub records: Vec<ManifestRecord>,
    pub skipped_lines: usize,
}

/// Streaming manifest writer.
///
/// Truncates any pre-existing file at the output path and appends one record
/// at a time, flushing incrementally so generation never buffers the full
/// manifest in memory.
pub struct ManifestWriter {
    inner: BufWriter<File>,
    path: PathBuf,
    records: usize,
}

impl ManifestWriter {
    /// Create a writer, truncating `path` if it exists.
    ///
    /// # Errors
    /// Returns an error if the output file cannot be created.
    pub async fn create(path: &Path) -> Result<Self, Error> {
        let file = File::create(path)
            .await
            .map_err(|e| ManifestError::WriteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            inner: BufWriter::new(file),
            path: path.to_path_buf(),
            records: 0,
        })
    }

    /// Append one record and flush it to disk.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    pub async fn write_record(&mut self, record: &ManifestRecord) -> Result<(), Error> {
        let line = format!("{}\t{}\n", record.digest_hex, record.relative_path);
        self.inner
            .write_all(line.as_bytes())
            .await
            .map_err(|e| self.write_error(&e))?;
        self.inner.flush().await.map_err(|e| self.write_error(&e))?;
        self.records += 1;
        Ok(())
    }

    /// Flush and close the writer.
    ///
    /// # Errors
    /// Returns an error if the final flush fails.
    pub async fn finish(mut self) -> Result<usize, Error> {
        self.inner.flush().await.map_err(|e| self.write_error(&e))?;
        Ok(self.records)
    }

    fn write_error(&self, err: &std::io::Error) -> Error {
        ManifestError::WriteFailed {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
        .into()
    }
}

/// Read and parse a manifest file.
///
/// Malformed lines (missing tab, empty digest, empty path) are skipped and
/// counted in `skipped_lines`; only an unreadable manifest file is fatal.
///
/// # Errors
/// Returns `ManifestError::Unreadable` if the file cannot be opened or read.
pub async fn read_manifest(path: &Path) -> Result<ManifestFile, Error> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut records = Vec::new();
    let mut skipped_lines = 0;

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((digest_hex, relative_path))
                if !digest_hex.is_empty() && !relative_path.is_empty() =>
            {
                records.push(ManifestRecord::new(relative_path, digest_hex));
            }
            _ => skipped_lines += 1,
        }
    }

    Ok(ManifestFile {
        records,
        skipped_lines,
    })
}
