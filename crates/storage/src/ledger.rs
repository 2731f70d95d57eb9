//! In-memory versioned ledger
//!
//! # Design
//!
//! - DashMap: key -> [`VersionChain`], sharded, lock-free reads
//! - Each chain is the key's append-only history, oldest first
//! - World state is derived: the latest modification of a chain, unless it
//!   is a delete
//! - Commits are serialized by a single mutex so every transaction's writes
//!   land contiguously in commit order
//!
//! This is a stand-in for an external ledger runtime. It provides the
//! capability set record operations need (get/put/delete, per-key history)
//! and nothing more: no durability, no endorsement, no conflict detection.

use dashmap::DashMap;
use howdog_core::{KeyModification, LedgerError, LedgerResult, LedgerTimestamp};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::transaction::{PendingWrite, TransactionContext};

/// Append-only history of one key
///
/// Modifications are stored oldest-first, in the order they were committed.
#[derive(Debug, Clone, Default)]
pub struct VersionChain {
    modifications: Vec<KeyModification>,
}

impl VersionChain {
    /// Append a modification (must be newer than everything already stored)
    #[inline]
    pub fn push(&mut self, modification: KeyModification) {
        self.modifications.push(modification);
    }

    /// Most recent modification
    #[inline]
    pub fn latest(&self) -> Option<&KeyModification> {
        self.modifications.last()
    }

    /// Current value, `None` if the latest modification is a delete
    pub fn current_value(&self) -> Option<&[u8]> {
        self.latest()
            .filter(|m| !m.is_delete)
            .map(|m| m.value.as_slice())
    }

    /// Full history, oldest first
    pub fn history(&self) -> &[KeyModification] {
        &self.modifications
    }

    /// Number of modifications recorded
    pub fn version_count(&self) -> usize {
        self.modifications.len()
    }
}

/// Outcome of a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Transaction id every modification was recorded under
    pub tx_id: String,
    /// Commit timestamp
    pub timestamp: LedgerTimestamp,
    /// Number of puts applied
    pub puts_applied: usize,
    /// Number of deletes applied
    pub deletes_applied: usize,
}

impl CommitReceipt {
    /// Total number of modifications applied
    pub fn total_operations(&self) -> usize {
        self.puts_applied + self.deletes_applied
    }
}

/// In-memory ledger with world state and per-key history
///
/// `MemoryLedger` is `Send + Sync`; share it with `Arc` and open one
/// [`TransactionContext`] per operation.
///
/// # Example
///
/// ```
/// use howdog_core::LedgerStub;
/// use howdog_storage::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// let tx = ledger.begin();
/// tx.put_state("R1", b"{}".to_vec()).unwrap();
/// tx.commit().unwrap();
///
/// assert_eq!(ledger.get("R1"), Some(b"{}".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryLedger {
    keys: DashMap<String, VersionChain>,
    commit_lock: Mutex<()>,
    committed: AtomicU64,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction with a fresh id, stamped with the current time
    pub fn begin(&self) -> TransactionContext<'_> {
        self.begin_at(Uuid::new_v4().simple().to_string(), LedgerTimestamp::now())
    }

    /// Open a transaction with an explicit id and commit timestamp
    pub fn begin_at(
        &self,
        tx_id: impl Into<String>,
        timestamp: LedgerTimestamp,
    ) -> TransactionContext<'_> {
        let tx_id = tx_id.into();
        debug!(target: "howdog::ledger", tx_id = %tx_id, "Transaction started");
        TransactionContext::new(self, tx_id, timestamp)
    }

    /// Committed value of `key`, `None` if absent or deleted
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.keys
            .get(key)
            .and_then(|chain| chain.current_value().map(<[u8]>::to_vec))
    }

    /// Committed history of `key`, oldest first
    pub fn history(&self, key: &str) -> Vec<KeyModification> {
        self.keys
            .get(key)
            .map(|chain| chain.history().to_vec())
            .unwrap_or_default()
    }

    /// Number of keys with at least one modification
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of transactions that committed at least one write
    pub fn committed_transactions(&self) -> u64 {
        self.committed.load(Ordering::Acquire)
    }

    /// Number of history cursors currently open
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::Acquire)
    }

    pub(crate) fn cursor_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open_cursors)
    }

    pub(crate) fn chain_snapshot(&self, key: &str) -> Vec<KeyModification> {
        self.history(key)
    }

    /// Apply a transaction's write set under a single tx id and timestamp
    pub(crate) fn apply(
        &self,
        tx_id: &str,
        timestamp: LedgerTimestamp,
        writes: BTreeMap<String, PendingWrite>,
    ) -> CommitReceipt {
        let mut receipt = CommitReceipt {
            tx_id: tx_id.to_string(),
            timestamp,
            puts_applied: 0,
            deletes_applied: 0,
        };
        if writes.is_empty() {
            return receipt;
        }

        let _guard = self.commit_lock.lock();
        for (key, write) in writes {
            let modification = match write {
                PendingWrite::Put(value) => {
                    receipt.puts_applied += 1;
                    KeyModification::write(tx_id, timestamp, value)
                }
                PendingWrite::Delete => {
                    receipt.deletes_applied += 1;
                    KeyModification::delete(tx_id, timestamp)
                }
            };
            self.keys.entry(key).or_default().push(modification);
        }
        self.committed.fetch_add(1, Ordering::AcqRel);

        debug!(
            target: "howdog::ledger",
            tx_id = %tx_id,
            puts = receipt.puts_applied,
            deletes = receipt.deletes_applied,
            "Transaction committed"
        );
        receipt
    }
}

/// Reject keys the ledger cannot store
pub(crate) fn validate_key(key: &str) -> LedgerResult<()> {
    if key.is_empty() {
        return Err(LedgerError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }
    if key.starts_with('\u{0}') {
        return Err(LedgerError::InvalidKey {
            key: key.to_string(),
            reason: "keys starting with U+0000 are reserved for composite keys".to_string(),
        });
    }
    Ok(())
}
