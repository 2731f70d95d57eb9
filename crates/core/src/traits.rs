//! Ledger-facing traits
//!
//! The ledger itself (durability, consensus, endorsement, isolation between
//! concurrent transactions) lives outside this workspace. Record operations
//! see it only through the narrow capability set defined here:
//!
//! - [`LedgerStub`]: the per-transaction handle (world-state get/put/delete
//!   and per-key history).
//! - [`HistoryIterator`]: a ledger-side cursor over one key's history log.
//! - [`HistoryCursor`]: scoped ownership of a `HistoryIterator` that releases
//!   it exactly once on every exit path.
//! - [`ReceiptContract`]: the fixed operation set handed to a host runtime.

use crate::error::{LedgerResult, RecordResult};
use crate::history::{HistoryEntry, KeyModification};
use crate::record::Record;
use crate::timestamp::LedgerTimestamp;

/// Transaction context granting one operation access to the ledger
///
/// Implementations decide isolation and commit semantics. Reads return the
/// committed world state; an empty value means the key is absent or deleted.
pub trait LedgerStub {
    /// Identifier of the transaction this context belongs to
    fn tx_id(&self) -> &str;

    /// Timestamp the transaction will commit with
    fn tx_timestamp(&self) -> LedgerTimestamp;

    /// Read the current value of `key`
    ///
    /// Returns an empty vector if the key was never written or was deleted.
    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>>;

    /// Write `value` under `key`
    fn put_state(&self, key: &str, value: Vec<u8>) -> LedgerResult<()>;

    /// Delete `key`
    fn del_state(&self, key: &str) -> LedgerResult<()>;

    /// Open a cursor over the history of `key`, oldest modification first
    ///
    /// The caller must release the cursor with [`HistoryIterator::close`];
    /// wrap it in a [`HistoryCursor`] to get that on every exit path.
    fn get_history_for_key<'a>(&'a self, key: &str)
        -> LedgerResult<Box<dyn HistoryIterator + 'a>>;
}

/// Ledger-side cursor over one key's history log
pub trait HistoryIterator {
    /// Whether another modification is available
    fn has_next(&self) -> bool;

    /// Advance and return the next modification
    fn next_modification(&mut self) -> LedgerResult<KeyModification>;

    /// Release the cursor
    ///
    /// Implementations must tolerate being closed more than once.
    fn close(&mut self) -> LedgerResult<()>;
}

/// Scoped owner of a history cursor
///
/// Closes the underlying iterator exactly once: explicitly through
/// [`HistoryCursor::close`], or on drop otherwise (early `?` returns
/// included).
///
/// Also an `Iterator` over `LedgerResult<KeyModification>`; iteration stops
/// after the first error.
pub struct HistoryCursor<'a> {
    inner: Box<dyn HistoryIterator + 'a>,
    closed: bool,
    failed: bool,
}

impl<'a> HistoryCursor<'a> {
    /// Take ownership of an open iterator
    pub fn new(inner: Box<dyn HistoryIterator + 'a>) -> Self {
        HistoryCursor {
            inner,
            closed: false,
            failed: false,
        }
    }

    /// Release the cursor now and report any release error
    pub fn close(mut self) -> LedgerResult<()> {
        self.release()
    }

    fn release(&mut self) -> LedgerResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.close()
    }
}

impl Iterator for HistoryCursor<'_> {
    type Item = LedgerResult<KeyModification>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed || self.failed || !self.inner.has_next() {
            return None;
        }
        let item = self.inner.next_modification();
        self.failed = item.is_err();
        Some(item)
    }
}

impl Drop for HistoryCursor<'_> {
    fn drop(&mut self) {
        // Only reached unclosed on unwind or when a caller skips `close`;
        // a release error is dropped here on purpose
        let _ = self.release();
    }
}

/// Operation set of the receipt contract
///
/// Implemented by the record service and dispatched to by the host runtime.
/// Every operation runs inside the single transaction context it is given.
pub trait ReceiptContract {
    /// Register a new receipt with status `registered`
    fn register_receipt(
        &self,
        stub: &dyn LedgerStub,
        rid: &str,
        guardian: &str,
        diagnosis_info: &str,
        price: u64,
    ) -> RecordResult<()>;

    /// Read the current record for `rid`
    fn query_record(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Record>;

    /// Move a registered receipt to `verified`
    fn verify_receipt(&self, stub: &dyn LedgerStub, rid: &str, verifier: &str)
        -> RecordResult<()>;

    /// Reconstruct every revision of `rid`, oldest first
    fn get_history(&self, stub: &dyn LedgerStub, rid: &str) -> RecordResult<Vec<HistoryEntry>>;
}
