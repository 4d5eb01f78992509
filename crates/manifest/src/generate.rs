//! Manifest generation pipeline
//!
//! Walks the tree, hashes each file in fixed-size chunks, and streams one
//! record per file to the output. A file that cannot be hashed is reported
//! and skipped; it never aborts the remaining walk.

use crate::{collect_files, ManifestRecord, ManifestWriter};
use std::path::Path;
use treesum_errors::Error;
use treesum_events::{AppEvent, EventEmitter, EventSender, GenerateEvent};
use treesum_hash::{Digest, DigestAlgorithm};

/// Generates digest manifests for directory trees.
pub struct Generator {
    algorithm: DigestAlgorithm,
    tx: Option<EventSender>,
}

impl EventEmitter for Generator {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl Generator {
    #[must_use]
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            tx: None,
        }
    }

    /// Attach an event sender for progress and warning reporting.
    #[must_use]
    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Hash every regular file under `root` and write one record per file to
    /// `output`, truncating any pre-existing manifest there. Returns the
    /// number of records written; an empty tree yields an empty manifest and
    /// zero.
    ///
    /// # Errors
    /// Returns an error if `root` cannot be walked or the output file cannot
    /// be written. Per-file hash failures are reported as events and do not
    /// abort the run.
    pub async fn write_manifest(&self, root: &Path, output: &Path) -> Result<usize, Error> {
        let tree = collect_files(root)?;

        for path in &tree.skipped {
            self.emit_warning(format!("skipping non-regular file: {path}"));
        }

        self.emit(AppEvent::Generate(GenerateEvent::Started {
            root: root.display().to_string(),
            algorithm: self.algorithm.to_string(),
            files: tree.files.len(),
        }));

        let mut writer = ManifestWriter::create(output).await?;
        let mut failed = 0;

        for relative_path in &tree.files {
            let file_path = root.join(relative_path);
            match Digest::hash_file(&file_path, self.algorithm).await {
                Ok(digest) => {
                    writer
                        .write_record(&ManifestRecord::new(relative_path.clone(), digest.to_hex()))
                        .await?;
                    self.emit(AppEvent::Generate(GenerateEvent::FileHashed {
                        relative_path: relative_path.clone(),
                    }));
                }
                Err(e) => {
                    failed += 1;
                    self.emit(AppEvent::Generate(GenerateEvent::FileFailed {
                        relative_path: relative_path.clone(),
                        message: e.to_string(),
                    }));
                }
            }
        }

        let records = writer.finish().await?;

        self.emit(AppEvent::Generate(GenerateEvent::Completed {
            manifest_path: output.display().to_string(),
            files: records,
            failed,
        }));

        Ok(records)
    }
}
