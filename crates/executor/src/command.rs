//! Command enum defining the receipt contract's operations.
//!
//! Commands are the "instruction set" of the contract. Every operation an
//! invoker can request is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Typed**: Arguments are already parsed; `price` is an unsigned integer
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

/// A command is a self-contained, serializable operation.
///
/// | Command | Writes | Returns |
/// |---------|--------|---------|
/// | `RegisterReceipt` | yes | `Output::Unit` |
/// | `QueryRecord` | no | `Output::Record` |
/// | `VerifyReceipt` | yes | `Output::Unit` |
/// | `GetHistory` | no | `Output::History` |
///
/// # Example
///
/// ```
/// use howdog_executor::Command;
///
/// let cmd = Command::RegisterReceipt {
///     rid: "R1".into(),
///     guardian: "guardA".into(),
///     diagnosis_info: "flu".into(),
///     price: 100,
/// };
/// assert_eq!(cmd.function_name(), "Register_receipt");
/// assert!(cmd.is_write());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Register a receipt with status `registered`.
    /// Returns: `Output::Unit`
    RegisterReceipt {
        rid: String,
        guardian: String,
        diagnosis_info: String,
        price: u64,
    },

    /// Read the current record.
    /// Returns: `Output::Record`
    QueryRecord { rid: String },

    /// Move a registered receipt to `verified`.
    /// Returns: `Output::Unit`
    VerifyReceipt { rid: String, verifier: String },

    /// Read every revision of a record, oldest first.
    /// Returns: `Output::History`
    GetHistory { rid: String },
}

impl Command {
    /// Function name invokers use on the wire
    pub fn function_name(&self) -> &'static str {
        match self {
            Command::RegisterReceipt { .. } => "Register_receipt",
            Command::QueryRecord { .. } => "Query_record",
            Command::VerifyReceipt { .. } => "Verify_receipt",
            Command::GetHistory { .. } => "GetHistory",
        }
    }

    /// Whether the command may write to the ledger
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::RegisterReceipt { .. } | Command::VerifyReceipt { .. }
        )
    }

    /// Receipt id the command operates on
    pub fn rid(&self) -> &str {
        match self {
            Command::RegisterReceipt { rid, .. }
            | Command::QueryRecord { rid }
            | Command::VerifyReceipt { rid, .. }
            | Command::GetHistory { rid } => rid,
        }
    }
}
