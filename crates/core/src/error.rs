//! Error types for the receipt ledger
//!
//! Two layers of errors live here:
//! - [`LedgerError`]: failures reported by the ledger accessor itself
//!   (world-state reads, writes, history cursors).
//! - [`RecordError`]: failures surfaced by record operations. Every variant
//!   names the key and, where a ledger call was involved, the operation that
//!   failed, so callers can diagnose without re-running the request.
//!
//! We use `thiserror` for automatic `Display` and `Error` implementations.

use crate::record::RecordStatus;
use std::fmt;
use thiserror::Error;

/// Result type alias for ledger accessor calls
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Result type alias for record operations
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Errors reported by the ledger accessor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger could not service the request (peer down, channel closed, ...)
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The key was rejected by the ledger
    #[error("invalid ledger key '{key}': {reason}")]
    InvalidKey {
        /// Offending key
        key: String,
        /// Why the ledger rejected it
        reason: String,
    },

    /// A history cursor was used after it was released
    #[error("history cursor for '{0}' is closed")]
    CursorClosed(String),

    /// Any other ledger-side failure
    #[error("ledger error: {0}")]
    Internal(String),
}

/// The ledger call an error was raised from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// World-state read
    GetState,
    /// World-state write
    PutState,
    /// Opening or advancing a key's history log
    GetHistoryForKey,
}

impl Operation {
    /// Stable name used in error messages and log fields
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::GetState => "get_state",
            Operation::PutState => "put_state",
            Operation::GetHistoryForKey => "get_history_for_key",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by record operations
///
/// # Categories
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `NotFound` | key never written, or deleted |
/// | `Read` | ledger read failed (distinct from absence) |
/// | `Write` | ledger write failed |
/// | `InvalidStateTransition` | status change not allowed from current status |
/// | `Decode` | stored bytes do not match the record schema |
/// | `Encode` | record could not be serialized |
/// | `Timestamp` | history timestamp cannot become a calendar time |
/// | `InvalidInput` | caller-supplied argument rejected before any ledger access |
/// | `AlreadyExists` | duplicate registration under the `Reject` policy |
#[derive(Debug, Error)]
pub enum RecordError {
    /// Key absent from world state
    #[error("{rid} does not exist")]
    NotFound {
        /// Receipt identifier
        rid: String,
    },

    /// Ledger read failure
    #[error("failed to read '{key}' from world state ({operation}): {source}")]
    Read {
        /// Key being read
        key: String,
        /// Ledger call that failed
        operation: Operation,
        /// Underlying ledger error
        #[source]
        source: LedgerError,
    },

    /// Ledger write failure
    #[error("failed to write '{key}' to world state ({operation}): {source}")]
    Write {
        /// Key being written
        key: String,
        /// Ledger call that failed
        operation: Operation,
        /// Underlying ledger error
        #[source]
        source: LedgerError,
    },

    /// Status transition not permitted
    #[error(
        "the receipt {rid} is not in ready state: cannot move from {} to {to}",
        .from.map_or("<unset>", |s| s.as_str())
    )]
    InvalidStateTransition {
        /// Receipt identifier
        rid: String,
        /// Current status (`None` for a record with no status)
        from: Option<RecordStatus>,
        /// Requested status
        to: RecordStatus,
    },

    /// Stored bytes are not a valid record document
    #[error("failed to decode record stored at '{key}': {source}")]
    Decode {
        /// Key whose value failed to decode
        key: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be encoded for storage
    #[error("failed to encode record for '{key}': {source}")]
    Encode {
        /// Key the record was destined for
        key: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// History entry timestamp is out of the representable calendar range
    #[error("invalid timestamp for '{key}' in transaction {tx_id}: {reason}")]
    Timestamp {
        /// Key whose history was being read
        key: String,
        /// Transaction that carried the timestamp
        tx_id: String,
        /// Why conversion failed
        reason: String,
    },

    /// Caller-supplied argument rejected
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// Record already registered
    #[error("{rid} is already registered")]
    AlreadyExists {
        /// Receipt identifier
        rid: String,
    },
}

impl RecordError {
    /// Build a `NotFound` error
    pub fn not_found(rid: impl Into<String>) -> Self {
        RecordError::NotFound { rid: rid.into() }
    }

    /// Build a `Read` error
    pub fn read(key: impl Into<String>, operation: Operation, source: LedgerError) -> Self {
        RecordError::Read {
            key: key.into(),
            operation,
            source,
        }
    }

    /// Build a `Write` error
    pub fn write(key: impl Into<String>, operation: Operation, source: LedgerError) -> Self {
        RecordError::Write {
            key: key.into(),
            operation,
            source,
        }
    }

    /// Build a `Decode` error
    pub fn decode(key: impl Into<String>, source: serde_json::Error) -> Self {
        RecordError::Decode {
            key: key.into(),
            source,
        }
    }

    /// Build an `Encode` error
    pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
        RecordError::Encode {
            key: key.into(),
            source,
        }
    }

    /// Build an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        RecordError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordError::NotFound { .. })
    }

    /// True for `InvalidStateTransition`
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, RecordError::InvalidStateTransition { .. })
    }
}
