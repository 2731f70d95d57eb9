//! Core types and traits for the receipt ledger
//!
//! This crate defines the foundational types shared by every other crate:
//! - Record / RecordStatus: the stored entity and its status state machine
//! - KeyModification / HistoryEntry: raw history items and reconstructed revisions
//! - LedgerTimestamp: the ledger's native commit timestamp
//! - LedgerError / RecordError: error hierarchy
//! - Traits: ledger capability set (LedgerStub, HistoryIterator) and the
//!   contract operation set (ReceiptContract)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod history;
pub mod record;
pub mod timestamp;
pub mod traits;

pub use error::{LedgerError, LedgerResult, Operation, RecordError, RecordResult};
pub use history::{HistoryEntry, KeyModification};
pub use record::{Record, RecordStatus, UnknownStatus};
pub use timestamp::{LedgerTimestamp, TimestampRangeError, MAX_VALID_SECONDS, MIN_VALID_SECONDS};
pub use traits::{HistoryCursor, HistoryIterator, LedgerStub, ReceiptContract};
