//! History log items and reconstructed record revisions
//!
//! - [`KeyModification`] is what the ledger yields for each write or delete
//!   of a key, oldest to newest in commit order.
//! - [`HistoryEntry`] is the record-level view of one modification: the
//!   decoded snapshot, the transaction that produced it, a calendar
//!   timestamp and the delete flag.

use crate::record::Record;
use crate::timestamp::LedgerTimestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item of a key's history log, as reported by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Transaction that committed this modification
    pub tx_id: String,
    /// Commit timestamp in the ledger's native representation
    pub timestamp: LedgerTimestamp,
    /// Stored value; empty for deletes
    pub value: Vec<u8>,
    /// Whether this modification deleted the key
    pub is_delete: bool,
}

impl KeyModification {
    /// A write of `value`
    pub fn write(tx_id: impl Into<String>, timestamp: LedgerTimestamp, value: Vec<u8>) -> Self {
        KeyModification {
            tx_id: tx_id.into(),
            timestamp,
            value,
            is_delete: false,
        }
    }

    /// A delete
    pub fn delete(tx_id: impl Into<String>, timestamp: LedgerTimestamp) -> Self {
        KeyModification {
            tx_id: tx_id.into(),
            timestamp,
            value: Vec::new(),
            is_delete: true,
        }
    }
}

/// One revision of a record, reconstructed from the history log
///
/// Serialized with the field names `record`, `txId`, `timestamp` (RFC 3339)
/// and `isDelete`. Whether the stored value was empty is not serialized; a
/// deserialized entry counts as holding a value unless it is a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Record snapshot at this revision, or a placeholder for an empty value
    pub record: Record,
    /// Transaction that produced this revision
    #[serde(rename = "txId")]
    pub tx_id: String,
    /// Commit time
    pub timestamp: DateTime<Utc>,
    /// Whether this revision deleted the record
    #[serde(rename = "isDelete")]
    pub is_delete: bool,
    /// Stored value at this revision was empty (delete or empty write)
    #[serde(skip)]
    empty_value: bool,
}

impl HistoryEntry {
    /// Revision whose stored value decoded into `record`
    pub fn new(
        record: Record,
        tx_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        is_delete: bool,
    ) -> Self {
        HistoryEntry {
            record,
            tx_id: tx_id.into(),
            timestamp,
            is_delete,
            empty_value: false,
        }
    }

    /// Revision with an empty stored value, carrying a placeholder record
    pub fn empty(
        rid: impl Into<String>,
        tx_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        is_delete: bool,
    ) -> Self {
        HistoryEntry {
            record: Record::placeholder(rid),
            tx_id: tx_id.into(),
            timestamp,
            is_delete,
            empty_value: true,
        }
    }

    /// Whether the ledger held a value for the key after this revision
    ///
    /// False for deletes and for writes of an empty value, both of which
    /// read back as absent.
    pub fn has_value(&self) -> bool {
        !self.is_delete && !self.empty_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_history_entry_wire_field_names() {
        let entry = HistoryEntry::new(
            Record::registered("R1", "guardA", "flu", 100),
            "tx-1",
            Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap(),
            false,
        );
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["txId"], "tx-1");
        assert_eq!(json["isDelete"], false);
        assert_eq!(json["timestamp"], "2021-03-04T05:06:07Z");
        assert_eq!(json["record"]["receiptid"], "R1");
        assert_eq!(json["record"]["status"], "registered");
        assert!(json.get("empty_value").is_none());
    }

    #[test]
    fn test_empty_entry_has_no_value() {
        let at = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();

        let written = HistoryEntry::empty("R1", "tx-1", at, false);
        assert_eq!(written.record, Record::placeholder("R1"));
        assert!(!written.is_delete);
        assert!(!written.has_value());

        assert!(!HistoryEntry::empty("R1", "tx-2", at, true).has_value());
        assert!(!HistoryEntry::new(Record::placeholder("R1"), "tx-3", at, true).has_value());
        assert!(HistoryEntry::new(Record::placeholder("R1"), "tx-4", at, false).has_value());
    }

    #[test]
    fn test_key_modification_delete_has_empty_value() {
        let m = KeyModification::delete("tx-9", LedgerTimestamp::EPOCH);
        assert!(m.is_delete);
        assert!(m.value.is_empty());
    }
}
