//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant.

use howdog_core::{HistoryEntry, Record};
use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// ```text
/// match executor.execute(&stub, Command::QueryRecord { rid })? {
///     Output::Record(record) => println!("{} -> {}", record.rid, record.guardian),
///     _ => unreachable!("QueryRecord always returns Record"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (register, verify)
    Unit,

    /// Current record (query)
    Record(Record),

    /// Revisions oldest first (history)
    History(Vec<HistoryEntry>),
}

impl Output {
    /// Render the payload invokers receive as a response message
    ///
    /// Writes report a fixed acknowledgement; reads return the record or
    /// history document itself.
    pub fn to_message(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Output::Unit => Ok(serde_json::Value::String(SUBMITTED_MESSAGE.to_string())),
            Output::Record(record) => serde_json::to_value(record),
            Output::History(entries) => serde_json::to_value(entries),
        }
    }
}

/// Acknowledgement returned for successful writes
pub const SUBMITTED_MESSAGE: &str = "Transaction has been submitted.";
