//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// treesum - generate and verify digest manifests for directory trees
#[derive(Parser)]
#[command(name = "treesum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate and verify digest manifests for directory trees")]
#[command(long_about = None)]
pub struct Cli {
    /// Verify the tree against an existing manifest instead of generating one
    #[arg(long)]
    pub verify: bool,

    /// Directory tree to hash or verify
    pub directory: PathBuf,

    /// Manifest file to write (generate) or read (verify)
    pub manifest: PathBuf,

    /// Digest algorithm (sha256 or blake3)
    #[arg(default_value = "sha256")]
    pub algorithm: String,

    /// Maximum number of files hashed concurrently during verification
    #[arg(long, default_value_t = 4, value_name = "N")]
    pub jobs: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
