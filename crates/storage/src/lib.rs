//! Storage layer for the receipt ledger
//!
//! This crate implements an in-memory stand-in for the external ledger:
//! - MemoryLedger: DashMap of per-key version chains (world state + history)
//! - TransactionContext: buffered write set, implements `LedgerStub`
//! - SnapshotCursor: point-in-time history cursor with release tracking
//!
//! Durability, consensus and cross-transaction conflict detection are the
//! real ledger's job and are not modelled here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ledger;
pub mod transaction;

pub use ledger::{CommitReceipt, MemoryLedger, VersionChain};
pub use transaction::{PendingOperations, PendingWrite, SnapshotCursor, TransactionContext};
