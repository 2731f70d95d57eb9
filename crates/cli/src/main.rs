//! howdog CLI entry point
//!
//! 1. Parses CLI arguments
//! 2. Loads `howdog.toml` (or defaults when no file is present)
//! 3. Installs the tracing subscriber (stderr, `RUST_LOG` over `log_level`)
//! 4. Serves stdin invocations until EOF
//!
//! Exits non-zero on a startup error or if any invocation failed.

mod args;
mod pipe;

use std::io;
use std::path::Path;
use std::process;

use howdog_executor::{bootstrap, ContractConfig, Error, Result};
use tracing_subscriber::EnvFilter;

use args::Cli;
use pipe::PipeRuntime;

fn main() {
    match run(Cli::parse_args()) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let path = cli.config_path();

    if cli.init_config {
        if ContractConfig::write_default_if_missing(&path)? {
            eprintln!("Wrote default configuration to {}", path.display());
        } else {
            eprintln!("{} already exists, left unchanged", path.display());
        }
        return Ok(0);
    }

    let mut config = load_config(cli.config.is_some(), &path)?;
    if let Some(contract) = cli.contract {
        config.contract = contract;
    }
    init_logging(&config.log_level)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut runtime = PipeRuntime::new(stdin.lock(), stdout.lock());
    bootstrap(&config, &mut runtime)?;

    Ok(if runtime.failures() == 0 { 0 } else { 1 })
}

/// An explicit `--config` must exist; the implicit default may be absent
fn load_config(explicit: bool, path: &Path) -> Result<ContractConfig> {
    if explicit || path.exists() {
        ContractConfig::from_file(path)
    } else {
        Ok(ContractConfig::default())
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| Error::Config {
            reason: format!("invalid log_level '{}': {}", level, e),
        })?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| Error::Internal {
            reason: format!("failed to install log subscriber: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_implicit_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(false, &dir.path().join("howdog.toml")).unwrap();
        assert_eq!(config, ContractConfig::default());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(true, &dir.path().join("howdog.toml")).is_err());
    }

    #[test]
    fn test_present_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("howdog.toml");
        std::fs::write(&path, "registration = \"reject\"\n").unwrap();
        let config = load_config(false, &path).unwrap();
        assert_eq!(config.registration, "reject");
    }

    #[test]
    fn test_init_config_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("howdog.toml");
        let cli = Cli {
            config: Some(path.clone()),
            init_config: true,
            contract: None,
        };
        assert_eq!(run(cli).unwrap(), 0);
        assert!(ContractConfig::from_file(&path).is_ok());
    }
}
