//! # howdog executor
//!
//! Command layer and host boundary of the howdog receipt contract.
//!
//! - [`Command`]/[`Output`] - typed instruction set over the record service
//! - [`Invocation`] - the string-argument wire form invokers send
//! - [`Chaincode`]/[`HostRuntime`]/[`bootstrap`] - packaging for a host
//!   that owns the ledger and transport
//! - [`ContractConfig`] - `howdog.toml`
//!
//! ## Quick Start
//!
//! ```text
//! let config = ContractConfig::from_file(Path::new("howdog.toml"))?;
//! bootstrap(&config, &mut my_runtime)?;
//! ```
//!
//! ## Functions
//!
//! | Function | Arguments | Writes |
//! |----------|-----------|--------|
//! | `Register_receipt` | rid, guardian, diagnosis info, price | yes |
//! | `Query_record` | rid | no |
//! | `Verify_receipt` | rid, verifier | yes |
//! | `GetHistory` | rid | no |

#![warn(missing_docs)]

mod command;
mod config;
mod convert;
mod error;
mod executor;
mod invocation;
mod output;
mod runtime;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

pub use command::Command;
pub use config::{ContractConfig, CONFIG_FILE_NAME};
pub use error::Error;
pub use executor::Executor;
pub use invocation::{Invocation, FUNCTIONS};
pub use output::{Output, SUBMITTED_MESSAGE};
pub use runtime::{bootstrap, Chaincode, HostRuntime, Response};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
