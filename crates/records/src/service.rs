//! RecordService: receipt lifecycle over a ledger transaction
//!
//! ## Design
//!
//! RecordService is a stateless facade. It holds only its registration
//! policy; every record lives in the ledger and every call works through the
//! [`LedgerStub`] it is handed, so the service can be shared freely and
//! tested without a live ledger.
//!
//! ## Operations
//!
//! - `register`: write a new record with status `registered`
//! - `query`: read and decode the current record
//! - `verify`: `registered -> verified`, anything else is rejected
//! - `history`: every revision of a record, oldest first
//!
//! ## Atomicity
//!
//! `register` and `verify` perform at most one ledger write, and only after
//! every check has passed. `history` returns the complete log or an error,
//! never a prefix.

use howdog_core::{
    HistoryCursor, HistoryEntry, LedgerStub, Operation, ReceiptContract, Record, RecordError,
    RecordResult, RecordStatus,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::replay::reconstruct_entry;

/// What `register` does when the receipt id already holds a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationPolicy {
    /// Write unconditionally; an existing record is replaced
    #[default]
    Overwrite,
    /// Fail with `AlreadyExists` if a record is present
    Reject,
}

impl RegistrationPolicy {
    /// Config-file name of the policy
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegistrationPolicy::Overwrite => "overwrite",
            RegistrationPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for RegistrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationPolicy {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(RegistrationPolicy::Overwrite),
            "reject" => Ok(RegistrationPolicy::Reject),
            other => Err(RecordError::invalid_input(format!(
                "unknown registration policy '{}', expected \"overwrite\" or \"reject\"",
                other
            ))),
        }
    }
}

/// Receipt record service
///
/// # Example
///
/// ```
/// use howdog_records::RecordService;
/// use howdog_storage::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// let service = RecordService::new();
///
/// let tx = ledger.begin();
/// service.register(&tx, "R1", "guardA", "flu", 100).unwrap();
/// tx.commit().unwrap();
///
/// let tx = ledger.begin();
/// let record = service.query(&tx, "R1").unwrap();
/// assert_eq!(record.guardian, "guardA");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordService {
    policy: RegistrationPolicy,
}

impl RecordService {
    /// Create a service with the default (overwrite) registration policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with an explicit registration policy
    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self { policy }
    }

    /// Registration policy in effect
    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Register a receipt
    ///
    /// Writes a record with status `registered` under `rid`. Under the
    /// default policy an existing record is overwritten, status included.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `rid` is empty (no ledger access)
    /// - `AlreadyExists` under [`RegistrationPolicy::Reject`]
    /// - `Read` / `Decode` from the existence check under `Reject`
    /// - `Write` if the ledger rejects the write
    pub fn register(
        &self,
        stub: &dyn LedgerStub,
        rid: &str,
        guardian: &str,
        diagnosis_info: &str,
        price: u64,
    ) -> RecordResult<()> {
        if rid.is_empty() {
            return Err(RecordError::invalid_input("receipt id must not be empty"));
        }

        if self.policy == RegistrationPolicy::Reject && self.read_record(stub, rid)?.is_some() {
            warn!(target: "howdog::records", rid = %rid, "Duplicate registration rejected");
            return Err(RecordError::AlreadyExists {
                rid: rid.to_string(),
            });
        }

        let record = Record::registered(rid, guardian, diagnosis_info, price);
        self.write_record(stub, rid, &record)?;

        info!(
            target: "howdog::records",
            rid = %rid,
            guardian = %guardian,
            price,
            tx_id = %stub.tx_id(),
            "Receipt registered"
        );
        Ok(())
    }

    /// Read the current record
    ///
    /// # Errors
    ///
    /// - `NotFound` if the key was never written or is deleted
    /// - `Read` if the ledger read itself failed
    /// - `Decode` if the stored value is not a record document
    pub fn query(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Record> {
        self.read_record(stub, rid)?
            .ok_or_else(|| RecordError::not_found(rid))
    }

    /// Verify a registered receipt
    ///
    /// `verifier` is logged but not stored on the record.
    ///
    /// # Errors
    ///
    /// - Anything `query` returns
    /// - `InvalidStateTransition` unless the current status is `registered`
    /// - `Write` if the ledger rejects the write
    pub fn verify(&self, stub: &dyn LedgerStub, rid: &str, verifier: &str) -> RecordResult<()> {
        let mut record = self.query(stub, rid)?;

        let current = record.status;
        if let Err(e) = record.transition_to(RecordStatus::Verified) {
            warn!(
                target: "howdog::records",
                rid = %rid,
                status = current.map_or("", |s| s.as_str()),
                "Receipt is not in ready state"
            );
            return Err(e);
        }
        self.write_record(stub, rid, &record)?;

        info!(
            target: "howdog::records",
            rid = %rid,
            verifier = %verifier,
            tx_id = %stub.tx_id(),
            "Receipt verified"
        );
        Ok(())
    }

    /// Reconstruct every revision of a record, oldest first
    ///
    /// A key with no history yields an empty vector. The ledger's history
    /// cursor is released on every path out of this function.
    ///
    /// # Errors
    ///
    /// - `Read` if the log cannot be opened or advanced
    /// - `Decode` if any stored value is not a record document
    /// - `Timestamp` if any commit timestamp is out of range
    pub fn history(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Vec<HistoryEntry>> {
        debug!(target: "howdog::records", rid = %rid, "Reading receipt history");

        let iterator = stub
            .get_history_for_key(rid)
            .map_err(|e| RecordError::read(rid, Operation::GetHistoryForKey, e))?;
        let mut cursor = HistoryCursor::new(iterator);
        let result = read_entries(rid, &mut cursor);

        // A failed release neither invalidates a complete read nor replaces
        // the error that aborted one
        if let Err(e) = cursor.close() {
            warn!(
                target: "howdog::records",
                rid = %rid,
                error = %e,
                complete = result.is_ok(),
                "History cursor release failed"
            );
        }

        let entries = result?;
        debug!(target: "howdog::records", rid = %rid, revisions = entries.len(), "Receipt history read");
        Ok(entries)
    }

    /// Read and decode the record under `rid`, `None` if absent
    fn read_record(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Option<Record>> {
        let bytes = stub
            .get_state(rid)
            .map_err(|e| RecordError::read(rid, Operation::GetState, e))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Record::from_bytes(&bytes)
            .map(Some)
            .map_err(|e| RecordError::decode(rid, e))
    }

    /// Encode `record` and write it under `rid`
    fn write_record(&self, stub: &dyn LedgerStub, rid: &str, record: &Record) -> RecordResult<()> {
        let bytes = record.to_bytes().map_err(|e| RecordError::encode(rid, e))?;
        stub.put_state(rid, bytes)
            .map_err(|e| RecordError::write(rid, Operation::PutState, e))
    }
}

/// Drain `cursor` into revisions, stopping at the first failure
fn read_entries(rid: &str, cursor: &mut HistoryCursor<'_>) -> RecordResult<Vec<HistoryEntry>> {
    let mut entries = Vec::new();
    for item in cursor.by_ref() {
        let modification =
            item.map_err(|e| RecordError::read(rid, Operation::GetHistoryForKey, e))?;
        entries.push(reconstruct_entry(rid, modification)?);
    }
    Ok(entries)
}

impl ReceiptContract for RecordService {
    fn register_receipt(
        &self,
        stub: &dyn LedgerStub,
        rid: &str,
        guardian: &str,
        diagnosis_info: &str,
        price: u64,
    ) -> RecordResult<()> {
        self.register(stub, rid, guardian, diagnosis_info, price)
    }

    fn query_record(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Record> {
        self.query(stub, rid)
    }

    fn verify_receipt(
        &self,
        stub: &dyn LedgerStub,
        rid: &str,
        verifier: &str,
    ) -> RecordResult<()> {
        self.verify(stub, rid, verifier)
    }

    fn get_history(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Vec<HistoryEntry>> {
        self.history(stub, rid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("overwrite".parse::<RegistrationPolicy>().unwrap(), RegistrationPolicy::Overwrite);
        assert_eq!("reject".parse::<RegistrationPolicy>().unwrap(), RegistrationPolicy::Reject);
        assert!(matches!(
            "ignore".parse::<RegistrationPolicy>(),
            Err(RecordError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_default_policy_is_overwrite() {
        assert_eq!(RecordService::new().policy(), RegistrationPolicy::Overwrite);
        assert_eq!(
            RecordService::with_policy(RegistrationPolicy::Reject).policy(),
            RegistrationPolicy::Reject
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&RegistrationPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }
}
