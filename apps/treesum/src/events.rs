//! Event handling and console rendering
//!
//! The core crates never print; everything user-visible arrives here as an
//! event and is rendered according to the color settings.

use console::style;
use tracing::{debug, warn};
use treesum_events::{AppEvent, GeneralEvent, GenerateEvent, VerifyEvent, VerifyOutcome};

/// Renders domain events to the console
pub struct EventHandler {
    colors_enabled: bool,
}

impl EventHandler {
    /// Create new event handler
    #[must_use]
    pub fn new(colors_enabled: bool) -> Self {
        Self { colors_enabled }
    }

    /// Handle incoming event
    pub fn handle_event(&self, event: &AppEvent) {
        match event {
            AppEvent::General(general) => self.handle_general(general),
            AppEvent::Generate(generate) => self.handle_generate(generate),
            AppEvent::Verify(verify) => self.handle_verify(verify),
        }
    }

    fn handle_general(&self, event: &GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => {
                warn!(context = ?context, "{message}");
                eprintln!("{} {message}", self.styled("Warning:", |s| s.yellow()));
            }
            GeneralEvent::Error { message, details } => {
                eprintln!("{} {message}", self.styled("Error:", |s| s.red().bold()));
                if let Some(details) = details {
                    eprintln!("  {details}");
                }
            }
        }
    }

    fn handle_generate(&self, event: &GenerateEvent) {
        match event {
            GenerateEvent::Started {
                root,
                algorithm,
                files,
            } => {
                debug!(%root, %algorithm, files, "generate started");
                println!("Hashing {files} files in {root} ({algorithm})");
            }
            GenerateEvent::FileHashed { relative_path } => {
                debug!(%relative_path, "hashed");
            }
            GenerateEvent::FileFailed {
                relative_path,
                message,
            } => {
                warn!(%relative_path, "hash failed: {message}");
                eprintln!(
                    "{} failed to hash {relative_path}: {message}",
                    self.styled("Warning:", |s| s.yellow())
                );
            }
            GenerateEvent::Completed {
                manifest_path,
                files,
                failed,
            } => {
                let line = if *failed > 0 {
                    format!("Hashes written to {manifest_path} ({files} files, {failed} failed)")
                } else {
                    format!("Hashes written to {manifest_path} ({files} files)")
                };
                println!("{}", self.styled(&line, |s| s.green()));
            }
        }
    }

    fn handle_verify(&self, event: &VerifyEvent) {
        match event {
            VerifyEvent::Started {
                root,
                manifest_path,
                algorithm,
                total,
            } => {
                debug!(%root, %manifest_path, %algorithm, total, "verify started");
                println!("Verifying {total} files in {root} against {manifest_path} ({algorithm})");
            }
            VerifyEvent::RecordChecked {
                relative_path,
                outcome,
            } => match outcome {
                VerifyOutcome::Match => debug!(%relative_path, "ok"),
                VerifyOutcome::Mismatch => {
                    println!("{} {relative_path}", self.styled("Mismatch:", |s| s.red()));
                }
                VerifyOutcome::Missing => {
                    println!("{} {relative_path}", self.styled("Missing:", |s| s.red()));
                }
                VerifyOutcome::Error => {
                    println!("{} {relative_path}", self.styled("Error:", |s| s.red()));
                }
            },
            VerifyEvent::Completed { summary } => {
                let line = format!(
                    "{} OK, {} mismatched, {} missing, {} errors, total {}",
                    summary.success,
                    summary.mismatch,
                    summary.missing,
                    summary.error,
                    summary.total
                );
                let ok = summary.success == summary.total;
                println!(
                    "\nVerification complete: {}",
                    self.styled(&line, |s| if ok { s.green() } else { s.red() })
                );
            }
        }
    }

    fn styled(
        &self,
        text: &str,
        apply: impl FnOnce(console::StyledObject<String>) -> console::StyledObject<String>,
    ) -> String {
        if self.colors_enabled {
            apply(style(text.to_string())).to_string()
        } else {
            text.to_string()
        }
    }
}
