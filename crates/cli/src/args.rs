//! CLI argument definitions using clap
//!
//! - `howdog` serves invocations read from stdin
//! - `howdog --init-config` writes a default `howdog.toml` and exits

use clap::Parser;
use std::path::PathBuf;

use howdog_executor::CONFIG_FILE_NAME;

/// howdog - receipt ledger contract host
///
/// Reads one JSON invocation per line from stdin, e.g.
/// {"function":"Register_receipt","args":["R1","guardA","flu","100"]},
/// and writes one JSON response per line to stdout.
#[derive(Parser, Debug)]
#[command(name = "howdog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to ./howdog.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a default configuration file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Serve the contract under this name instead of the configured one
    #[arg(long)]
    pub contract: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Config file to read or initialize
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }
}
