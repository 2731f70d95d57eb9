//! History reconstruction
//!
//! Turns raw history-log items into [`HistoryEntry`] revisions and replays a
//! sequence of revisions back into the record world state should hold.
//!
//! ## Rules
//!
//! - Non-empty value: decoded as a [`Record`]; a decode failure is an error.
//! - Empty value (delete, or an empty write): a placeholder carrying only
//!   the receipt id. Replay treats it as absent, as Query does.
//! - Timestamp: converted to a calendar time; out-of-range is an error.
//! - Order is whatever the ledger reported. Nothing here sorts.

use howdog_core::{HistoryEntry, KeyModification, Record, RecordError, RecordResult};

/// Build the revision for one history-log item of `rid`
pub fn reconstruct_entry(rid: &str, modification: KeyModification) -> RecordResult<HistoryEntry> {
    let KeyModification {
        tx_id,
        timestamp,
        value,
        is_delete,
    } = modification;

    let record = if value.is_empty() {
        None
    } else {
        Some(Record::from_bytes(&value).map_err(|e| RecordError::decode(rid, e))?)
    };

    let timestamp = timestamp
        .to_datetime()
        .map_err(|e| RecordError::Timestamp {
            key: rid.to_string(),
            tx_id: tx_id.clone(),
            reason: e.to_string(),
        })?;

    Ok(match record {
        Some(record) => HistoryEntry::new(record, tx_id, timestamp, is_delete),
        None => HistoryEntry::empty(rid, tx_id, timestamp, is_delete),
    })
}

/// Replay revisions in order and return the resulting current record
///
/// `None` when the history is empty or its last revision left no value
/// (a delete or an empty write).
pub fn replay<'a, I>(entries: I) -> Option<Record>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    entries
        .into_iter()
        .fold(None, |_, entry| entry.has_value().then(|| entry.record.clone()))
}
