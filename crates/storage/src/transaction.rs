//! Transaction context over the in-memory ledger
//!
//! A `TransactionContext` is the [`LedgerStub`] handed to one operation:
//!
//! - Reads see committed world state only. A transaction does not read its
//!   own buffered writes, matching ledgers that simulate a transaction
//!   against a snapshot and apply its write set at commit.
//! - Puts and deletes are buffered in a write set keyed by ledger key; the
//!   last write to a key wins.
//! - [`TransactionContext::commit`] applies the write set atomically under
//!   the context's tx id and timestamp. Dropping the context without
//!   committing discards it.

use howdog_core::{
    HistoryIterator, KeyModification, LedgerError, LedgerResult, LedgerStub, LedgerTimestamp,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::ledger::{validate_key, CommitReceipt, MemoryLedger};

/// Buffered modification of one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    /// Write a value
    Put(Vec<u8>),
    /// Delete the key
    Delete,
}

/// Summary of the buffered write set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperations {
    /// Number of pending puts
    pub puts: usize,
    /// Number of pending deletes
    pub deletes: usize,
}

impl PendingOperations {
    /// Check if there are no pending operations
    pub fn is_empty(&self) -> bool {
        self.puts + self.deletes == 0
    }
}

/// One transaction against a [`MemoryLedger`]
pub struct TransactionContext<'a> {
    ledger: &'a MemoryLedger,
    tx_id: String,
    timestamp: LedgerTimestamp,
    writes: Mutex<BTreeMap<String, PendingWrite>>,
}

impl<'a> TransactionContext<'a> {
    pub(crate) fn new(ledger: &'a MemoryLedger, tx_id: String, timestamp: LedgerTimestamp) -> Self {
        TransactionContext {
            ledger,
            tx_id,
            timestamp,
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Buffered operations that commit would apply
    pub fn pending_operations(&self) -> PendingOperations {
        let writes = self.writes.lock();
        let deletes = writes
            .values()
            .filter(|w| matches!(w, PendingWrite::Delete))
            .count();
        PendingOperations {
            puts: writes.len() - deletes,
            deletes,
        }
    }

    /// Apply the write set to the ledger
    pub fn commit(self) -> LedgerResult<CommitReceipt> {
        let writes = std::mem::take(&mut *self.writes.lock());
        Ok(self.ledger.apply(&self.tx_id, self.timestamp, writes))
    }

    /// Discard the write set
    pub fn rollback(self) {
        let pending = self.pending_operations();
        debug!(
            target: "howdog::ledger",
            tx_id = %self.tx_id,
            puts = pending.puts,
            deletes = pending.deletes,
            "Transaction rolled back"
        );
    }
}

impl LedgerStub for TransactionContext<'_> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> LedgerTimestamp {
        self.timestamp
    }

    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>> {
        validate_key(key)?;
        Ok(self.ledger.get(key).unwrap_or_default())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        validate_key(key)?;
        self.writes
            .lock()
            .insert(key.to_string(), PendingWrite::Put(value));
        Ok(())
    }

    fn del_state(&self, key: &str) -> LedgerResult<()> {
        validate_key(key)?;
        self.writes
            .lock()
            .insert(key.to_string(), PendingWrite::Delete);
        Ok(())
    }

    fn get_history_for_key<'s>(
        &'s self,
        key: &str,
    ) -> LedgerResult<Box<dyn HistoryIterator + 's>> {
        validate_key(key)?;
        Ok(Box::new(SnapshotCursor::open(
            key,
            self.ledger.chain_snapshot(key),
            self.ledger.cursor_counter(),
        )))
    }
}

/// History cursor over a point-in-time copy of a key's chain
///
/// Counts itself in the ledger's open-cursor gauge until closed or dropped.
pub struct SnapshotCursor {
    key: String,
    items: VecDeque<KeyModification>,
    open: Arc<AtomicUsize>,
    closed: bool,
}

impl SnapshotCursor {
    fn open(key: &str, items: Vec<KeyModification>, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::AcqRel);
        SnapshotCursor {
            key: key.to_string(),
            items: items.into(),
            open,
            closed: false,
        }
    }
}

impl HistoryIterator for SnapshotCursor {
    fn has_next(&self) -> bool {
        !self.closed && !self.items.is_empty()
    }

    fn next_modification(&mut self) -> LedgerResult<KeyModification> {
        if self.closed {
            return Err(LedgerError::CursorClosed(self.key.clone()));
        }
        self.items
            .pop_front()
            .ok_or_else(|| LedgerError::Internal(format!("history of '{}' exhausted", self.key)))
    }

    fn close(&mut self) -> LedgerResult<()> {
        if !self.closed {
            self.closed = true;
            self.items.clear();
            self.open.fetch_sub(1, Ordering::AcqRel);
        }
        Ok(())
    }
}

impl Drop for SnapshotCursor {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
