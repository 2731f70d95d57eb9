//! howdog - receipt lifecycle contract over an append-only versioned ledger
//!
//! A receipt is registered, verified once, and every revision stays in the
//! ledger's history. Four operations make up the contract: register, query,
//! verify and history.
//!
//! # Quick Start
//!
//! ```
//! use howdog::{MemoryLedger, RecordService, RecordStatus};
//!
//! let ledger = MemoryLedger::new();
//! let service = RecordService::new();
//!
//! let tx = ledger.begin();
//! service.register(&tx, "R1", "guardA", "flu", 100).unwrap();
//! tx.commit().unwrap();
//!
//! let tx = ledger.begin();
//! service.verify(&tx, "R1", "vX").unwrap();
//! tx.commit().unwrap();
//!
//! let tx = ledger.begin();
//! assert!(service.query(&tx, "R1").unwrap().is(RecordStatus::Verified));
//! assert_eq!(service.history(&tx, "R1").unwrap().len(), 2);
//! ```
//!
//! # Architecture
//!
//! | Crate | Role |
//! |-------|------|
//! | `howdog-core` | record model, errors, ledger traits |
//! | `howdog-storage` | in-memory versioned ledger |
//! | `howdog-records` | record service and history replay |
//! | `howdog-executor` | commands, wire invocations, host boundary, config |

pub use howdog_core::{
    HistoryCursor, HistoryEntry, HistoryIterator, KeyModification, LedgerError, LedgerStub,
    LedgerTimestamp, Operation, ReceiptContract, Record, RecordError, RecordResult, RecordStatus,
};
pub use howdog_executor::{
    bootstrap, Chaincode, Command, ContractConfig, Error, Executor, HostRuntime, Invocation,
    Output, Response, Result,
};
pub use howdog_records::{replay, RecordService, RegistrationPolicy};
pub use howdog_storage::{CommitReceipt, MemoryLedger, TransactionContext};
