//! Contract configuration via `howdog.toml`
//!
//! A default `howdog.toml` can be written next to the binary with
//! `--init-config`. To change settings, edit the file and restart.

use howdog_records::RegistrationPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "howdog.toml";

/// Contract configuration loaded from `howdog.toml`.
///
/// # Example
///
/// ```toml
/// contract = "howdog"
/// registration = "overwrite"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Name the chaincode is served under.
    #[serde(default = "default_contract")]
    pub contract: String,
    /// Duplicate registration policy: `"overwrite"` or `"reject"`.
    #[serde(default = "default_registration")]
    pub registration: String,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_contract() -> String {
    "howdog".to_string()
}

fn default_registration() -> String {
    RegistrationPolicy::default().as_str().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            contract: default_contract(),
            registration: default_registration(),
            log_level: default_log_level(),
        }
    }
}

impl ContractConfig {
    /// Parse the registration string into a [`RegistrationPolicy`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"overwrite"` or `"reject"`.
    pub fn registration_policy(&self) -> Result<RegistrationPolicy> {
        self.registration.parse::<RegistrationPolicy>().map_err(|_| Error::Config {
            reason: format!(
                "Invalid registration policy '{}' in {}. Expected \"overwrite\" or \"reject\".",
                self.registration, CONFIG_FILE_NAME
            ),
        })
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        if self.contract.trim().is_empty() {
            return Err(Error::Config {
                reason: format!("contract name in {} must not be empty", CONFIG_FILE_NAME),
            });
        }
        if self.log_level.trim().is_empty() {
            return Err(Error::Config {
                reason: format!("log_level in {} must not be empty", CONFIG_FILE_NAME),
            });
        }
        self.registration_policy()?;
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# howdog receipt contract configuration
#
# Name the chaincode is served under (default: "howdog")
contract = "howdog"

# What Register_receipt does when the receipt id already holds a record:
#   "overwrite" = replace it, status included (default)
#   "reject"    = fail with "already registered"
registration = "overwrite"

# Log filter used when RUST_LOG is unset.
# Accepts a level ("info") or directives ("howdog::records=debug,info").
log_level = "info"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let config: ContractConfig = toml::from_str(&content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(true)` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| Error::Io {
            reason: format!(
                "Failed to write default config file '{}': {}",
                path.display(),
                e
            ),
        })?;
        Ok(true)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Serialization {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| Error::Io {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}
