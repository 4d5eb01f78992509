//! treesum - digest manifests for directory trees
//!
//! Generates a manifest of content digests for every file under a directory
//! and verifies a tree against a previously captured manifest.

mod cli;
mod error;
mod events;

use crate::cli::Cli;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use std::process;
use tracing::{error, info};
use treesum_events::EventEmitter;
use treesum_hash::DigestAlgorithm;
use treesum_manifest::Generator;
use treesum_verify::Verifier;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic; returns whether the run counts as a success for
/// the exit code.
async fn run(cli: Cli) -> Result<bool, CliError> {
    info!("Starting treesum v{}", env!("CARGO_PKG_VERSION"));

    // Reject an unknown algorithm before touching the filesystem
    let algorithm: DigestAlgorithm = cli.algorithm.parse()?;

    let colors_enabled =
        !cli.no_color && console::Term::stdout().features().colors_supported();
    let handler = EventHandler::new(colors_enabled);

    let (tx, mut rx) = treesum_events::channel();
    let render = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            handler.handle_event(&event);
        }
    });

    let ok = if cli.verify {
        let manifest = treesum_manifest::read_manifest(&cli.manifest).await?;
        if manifest.skipped_lines > 0 {
            tx.emit_warning(format!(
                "skipped {} malformed manifest line(s)",
                manifest.skipped_lines
            ));
        }

        let report = Verifier::new(algorithm)
            .with_events(tx)
            .with_max_concurrency(cli.jobs)
            .verify(&cli.directory, &manifest.records, &cli.manifest)
            .await?;
        report.is_valid()
    } else {
        Generator::new(algorithm)
            .with_events(tx)
            .write_manifest(&cli.directory, &cli.manifest)
            .await?;
        true
    };

    // Sender side is dropped once the command finishes, which ends the
    // render task after the remaining events are drained.
    let _ = render.await;

    info!("Command completed");
    Ok(ok)
}

/// Initialize tracing with env-filter support
fn init_tracing(debug: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
