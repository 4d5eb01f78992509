use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use treesum_errors::{Error, StorageError};
use treesum_events::{
    AppEvent, EventEmitter, EventSender, VerifyEvent, VerifyOutcome, VerifySummary,
};
use treesum_hash::{Digest, DigestAlgorithm};
use treesum_manifest::ManifestRecord;

/// A non-match record surfaced for user-facing diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct RecordFailure {
    pub relative_path: String,
    pub outcome: VerifyOutcome,
}

/// Result of a verification run.
///
/// `failures` preserves manifest order; the summary counters cover every
/// record. A report is created fresh per run and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub summary: VerifySummary,
    pub failures: Vec<RecordFailure>,
    pub duration_ms: u64,
}

impl VerificationReport {
    /// Whether every record matched
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.summary.mismatch == 0 && self.summary.missing == 0 && self.summary.error == 0
    }
}

/// Checks a directory tree against a previously generated manifest.
///
/// Files are re-hashed with bounded concurrency, one file per task; the
/// aggregate counters are built in a single reduce over the re-ordered
/// outcomes, so no counter state is shared between tasks.
pub struct Verifier {
    algorithm: DigestAlgorithm,
    max_concurrency: usize,
    tx: Option<EventSender>,
}

impl EventEmitter for Verifier {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl Verifier {
    #[must_use]
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            max_concurrency: 4,
            tx: None,
        }
    }

    /// Attach an event sender for per-record and summary reporting.
    #[must_use]
    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Bound the number of files hashed concurrently (minimum 1).
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Verify `root` against the given manifest records.
    ///
    /// Every record reaches exactly one terminal outcome; a missing or
    /// unreadable file affects only its own classification, never the run.
    ///
    /// # Errors
    /// Returns an error only for infrastructure failures (task join); all
    /// per-file conditions are folded into the report.
    pub async fn verify(
        &self,
        root: &Path,
        records: &[ManifestRecord],
        manifest_path: &Path,
    ) -> Result<VerificationReport, Error> {
        let start = Instant::now();

        self.emit(AppEvent::Verify(VerifyEvent::Started {
            root: root.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
            algorithm: self.algorithm.to_string(),
            total: records.len(),
        }));

        let mut outcomes = self.check_records(root, records).await?;
        // Restore manifest order before the reduce so reports are deterministic
        outcomes.sort_unstable_by_key(|(index, _)| *index);

        let mut summary = VerifySummary {
            total: records.len(),
            ..VerifySummary::default()
        };
        let mut failures = Vec::new();

        for (index, outcome) in outcomes {
            let relative_path = &records[index].relative_path;
            self.emit(AppEvent::Verify(VerifyEvent::RecordChecked {
                relative_path: relative_path.clone(),
                outcome,
            }));

            match outcome {
                VerifyOutcome::Match => summary.success += 1,
                VerifyOutcome::Mismatch => summary.mismatch += 1,
                VerifyOutcome::Missing => summary.missing += 1,
                VerifyOutcome::Error => summary.error += 1,
            }
            if !outcome.is_match() {
                failures.push(RecordFailure {
                    relative_path: relative_path.clone(),
                    outcome,
                });
            }
        }

        self.emit(AppEvent::Verify(VerifyEvent::Completed { summary }));

        Ok(VerificationReport {
            summary,
            failures,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Re-hash every record's file, one task per file, bounded by the
    /// concurrency limit.
    async fn check_records(
        &self,
        root: &Path,
        records: &[ManifestRecord],
    ) -> Result<Vec<(usize, VerifyOutcome)>, Error> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, record) in records.iter().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| StorageError::IoError {
                    message: format!("semaphore acquire error: {e}"),
                })?;
            let file_path = root.join(&record.relative_path);
            let expected = record.digest_hex.clone();
            let algorithm = self.algorithm;

            tasks.spawn(async move {
                let _permit = permit; // Hold permit until task completes
                (index, check_file(&file_path, &expected, algorithm).await)
            });
        }

        let mut outcomes = Vec::with_capacity(records.len());
        while let Some(result) = tasks.join_next().await {
            let (index, outcome) = result.map_err(|e| StorageError::IoError {
                message: format!("task join error: {e}"),
            })?;
            outcomes.push((index, outcome));
        }

        Ok(outcomes)
    }
}

/// Classify one manifest record against the file on disk.
///
/// State machine per record: Pending -> Missing | Hashing; Hashing ->
/// Match | Mismatch | Error. All terminal, no retry.
async fn check_file(path: &Path, expected_hex: &str, algorithm: DigestAlgorithm) -> VerifyOutcome {
    match tokio::fs::metadata(path).await {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return VerifyOutcome::Missing,
        Err(_) => return VerifyOutcome::Error,
        Ok(_) => {}
    }

    match Digest::hash_file(path, algorithm).await {
        Ok(actual) if actual.matches_hex(expected_hex) => VerifyOutcome::Match,
        Ok(_) => VerifyOutcome::Mismatch,
        Err(_) => VerifyOutcome::Error,
    }
}
