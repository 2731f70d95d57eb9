//! Receipt record and its status state machine
//!
//! A [`Record`] is the value stored in world state under its receipt id.
//! It is persisted as a JSON document with the field names
//! `guardian`, `receiptid`, `diagnosisinfo`, `price` and `status`; those
//! names are part of the ledger format and must not change.
//!
//! ## Status order
//!
//! ```text
//! registered -> verified -> diagnosis -> prognosis
//! ```
//!
//! Status only ever moves forward. Only `registered -> verified` is a
//! defined transition; `diagnosis` and `prognosis` are reserved.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RecordError, RecordResult};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a receipt record
///
/// Variants are declared in lifecycle order, so the derived `Ord` is the
/// forward order of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Submitted by a guardian, awaiting verification
    Registered,
    /// Checked by a verifier
    Verified,
    /// Reserved
    Diagnosis,
    /// Reserved
    Prognosis,
}

impl RecordStatus {
    /// All statuses in lifecycle order
    pub const ALL: [RecordStatus; 4] = [
        RecordStatus::Registered,
        RecordStatus::Verified,
        RecordStatus::Diagnosis,
        RecordStatus::Prognosis,
    ];

    /// Wire name of the status
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Registered => "registered",
            RecordStatus::Verified => "verified",
            RecordStatus::Diagnosis => "diagnosis",
            RecordStatus::Prognosis => "prognosis",
        }
    }

    /// Whether `self -> next` is a defined transition
    ///
    /// Only `Registered -> Verified` is defined today.
    pub const fn can_transition_to(&self, next: RecordStatus) -> bool {
        matches!((self, next), (RecordStatus::Registered, RecordStatus::Verified))
    }

    /// Whether this status is the final one in the order
    pub const fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Prognosis)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for RecordStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A receipt record as stored in world state
///
/// `status` is `None` only for placeholder snapshots synthesized from empty
/// history values; it encodes as `""` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Submitting party
    #[serde(rename = "guardian", alias = "gadian")]
    pub guardian: String,

    /// Receipt id, also the ledger key
    #[serde(rename = "receiptid")]
    pub rid: String,

    /// Free-form diagnosis description
    #[serde(rename = "diagnosisinfo")]
    pub diagnosis_info: String,

    /// Price in the smallest currency unit
    pub price: u64,

    /// Lifecycle status
    #[serde(
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: Option<RecordStatus>,
}

impl Record {
    /// Create a freshly registered record
    pub fn registered(
        rid: impl Into<String>,
        guardian: impl Into<String>,
        diagnosis_info: impl Into<String>,
        price: u64,
    ) -> Self {
        Record {
            guardian: guardian.into(),
            rid: rid.into(),
            diagnosis_info: diagnosis_info.into(),
            price,
            status: Some(RecordStatus::Registered),
        }
    }

    /// Snapshot standing in for an empty stored value
    ///
    /// Only `rid` is populated.
    pub fn placeholder(rid: impl Into<String>) -> Self {
        Record {
            rid: rid.into(),
            ..Record::default()
        }
    }

    /// Encode as the ledger's JSON document
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the ledger's JSON document
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Whether the record is in the given status
    pub fn is(&self, status: RecordStatus) -> bool {
        self.status == Some(status)
    }

    /// Move the record to `next`
    ///
    /// Leaves the record untouched and returns `InvalidStateTransition`
    /// unless the current status can move to `next`.
    pub fn transition_to(&mut self, next: RecordStatus) -> RecordResult<()> {
        match self.status {
            Some(current) if current.can_transition_to(next) => {
                self.status = Some(next);
                Ok(())
            }
            current => Err(RecordError::InvalidStateTransition {
                rid: self.rid.clone(),
                from: current,
                to: next,
            }),
        }
    }
}

fn serialize_status<S>(status: &Option<RecordStatus>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(status.map_or("", |s| s.as_str()))
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<RecordStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
