//! Receipt record service
//!
//! The record lifecycle over a versioned ledger:
//! - RecordService: register, query, verify and history operations
//! - RegistrationPolicy: overwrite or reject duplicate registrations
//! - replay: history-log reconstruction into timestamped revisions
//!
//! The service reaches the ledger only through `howdog_core::LedgerStub`,
//! so any runtime that can hand it a transaction context can host it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod replay;
pub mod service;

pub use replay::{reconstruct_entry, replay};
pub use service::{RecordService, RegistrationPolicy};
