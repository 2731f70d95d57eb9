//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a test's main.rs.

#![allow(dead_code)]

use std::sync::Arc;

use howdog::{
    Chaincode, Command, Executor, HistoryEntry, Invocation, LedgerTimestamp, MemoryLedger, Output,
    Record, RecordService, RegistrationPolicy, Response, Result,
};

// ============================================================================
// TestContract - ledger + chaincode, one transaction per call
// ============================================================================

pub struct TestContract {
    pub ledger: MemoryLedger,
    pub chaincode: Chaincode,
}

impl TestContract {
    pub fn new() -> Self {
        Self::with_policy(RegistrationPolicy::Overwrite)
    }

    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        TestContract {
            ledger: MemoryLedger::new(),
            chaincode: Chaincode::new(
                "howdog",
                Executor::new(Arc::new(RecordService::with_policy(policy))),
            ),
        }
    }

    /// Execute a command, committing only on success
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let tx = self.ledger.begin();
        let result = self.chaincode.executor().execute(&tx, cmd);
        if result.is_ok() {
            tx.commit().unwrap();
        }
        result
    }

    /// Same as `execute`, under a fixed tx id and timestamp
    pub fn execute_at(&self, tx_id: &str, seconds: i64, cmd: Command) -> Result<Output> {
        let tx = self.ledger.begin_at(tx_id, LedgerTimestamp::new(seconds, 0));
        let result = self.chaincode.executor().execute(&tx, cmd);
        if result.is_ok() {
            tx.commit().unwrap();
        }
        result
    }

    /// Invoke by wire function name, committing only on success
    pub fn invoke(&self, function: &str, args: &[&str]) -> Response {
        let tx = self.ledger.begin();
        let response = self
            .chaincode
            .invoke(&tx, Invocation::new(function, args.iter().copied()));
        if response.is_success() {
            tx.commit().unwrap();
        }
        response
    }

    pub fn register(&self, rid: &str, guardian: &str, diagnosis_info: &str, price: u64) -> Result<Output> {
        self.execute(Command::RegisterReceipt {
            rid: rid.into(),
            guardian: guardian.into(),
            diagnosis_info: diagnosis_info.into(),
            price,
        })
    }

    pub fn verify(&self, rid: &str, verifier: &str) -> Result<Output> {
        self.execute(Command::VerifyReceipt {
            rid: rid.into(),
            verifier: verifier.into(),
        })
    }

    pub fn query(&self, rid: &str) -> Result<Record> {
        match self.execute(Command::QueryRecord { rid: rid.into() })? {
            Output::Record(record) => Ok(record),
            other => panic!("QueryRecord returned {:?}", other),
        }
    }

    pub fn history(&self, rid: &str) -> Result<Vec<HistoryEntry>> {
        match self.execute(Command::GetHistory { rid: rid.into() })? {
            Output::History(entries) => Ok(entries),
            other => panic!("GetHistory returned {:?}", other),
        }
    }

    /// Delete a key directly on the ledger
    pub fn delete(&self, rid: &str) {
        use howdog::LedgerStub;
        let tx = self.ledger.begin();
        tx.del_state(rid).unwrap();
        tx.commit().unwrap();
    }
}
