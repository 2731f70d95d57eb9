//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON and sent back to invokers
//! - **Diagnosable**: Ledger failures keep the key and the ledger call involved

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Not Found | `RecordNotFound` | Receipt never written or deleted |
/// | Validation | `UnknownFunction`, `InvalidArgument` | Bad invocation |
/// | State | `InvalidStateTransition`, `RecordExists` | Lifecycle violation |
/// | Ledger | `ReadFailed`, `WriteFailed` | Ledger access failed |
/// | Data | `Decode`, `Timestamp`, `Serialization` | Stored data unusable |
/// | System | `Config`, `Io`, `Internal` | Host-side failures |
///
/// # Example
///
/// ```ignore
/// use howdog_executor::{Command, Error};
///
/// match executor.execute(&stub, Command::QueryRecord { rid: "R1".into() }) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::RecordNotFound { rid }) => println!("{} is not registered", rid),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Receipt absent from world state
    #[error("{rid} does not exist")]
    RecordNotFound { rid: String },

    // ==================== Validation Errors ====================
    /// Invocation named a function the contract does not export
    #[error("unknown function: {function}")]
    UnknownFunction { function: String },

    /// Invocation argument missing, extra, or malformed
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // ==================== State Errors ====================
    /// Status transition not allowed from the current status
    #[error("the receipt {rid} is not in ready state: cannot move from {from} to {to}")]
    InvalidStateTransition {
        rid: String,
        from: String,
        to: String,
    },

    /// Receipt already registered (reject policy)
    #[error("{rid} is already registered")]
    RecordExists { rid: String },

    // ==================== Ledger Errors ====================
    /// Ledger read failed (distinct from absence)
    #[error("failed to read '{key}' from world state ({operation}): {reason}")]
    ReadFailed {
        key: String,
        operation: String,
        reason: String,
    },

    /// Ledger write failed
    #[error("failed to write '{key}' to world state ({operation}): {reason}")]
    WriteFailed {
        key: String,
        operation: String,
        reason: String,
    },

    // ==================== Data Errors ====================
    /// Stored value is not a record document
    #[error("failed to decode record stored at '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// History timestamp cannot be converted to calendar time
    #[error("invalid timestamp for '{key}' in transaction {tx_id}: {reason}")]
    Timestamp {
        key: String,
        tx_id: String,
        reason: String,
    },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    // ==================== System Errors ====================
    /// Configuration file missing, unreadable, or invalid
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// I/O error on the host side
    #[error("I/O error: {reason}")]
    Io { reason: String },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Whether the error was caused by the invocation itself rather than by
    /// ledger or host state
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::RecordNotFound { .. }
                | Error::UnknownFunction { .. }
                | Error::InvalidArgument { .. }
                | Error::InvalidStateTransition { .. }
                | Error::RecordExists { .. }
        )
    }
}
