//! Error conversion from record-layer error types.
//!
//! This module provides conversions from [`RecordError`] to the executor's
//! [`Error`] type. Source errors are flattened to strings so the result stays
//! `Clone + PartialEq + Serialize`.

use crate::{Error, Result};
use howdog_core::{RecordError, RecordResult};

impl From<RecordError> for Error {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound { rid } => Error::RecordNotFound { rid },

            RecordError::Read {
                key,
                operation,
                source,
            } => Error::ReadFailed {
                key,
                operation: operation.to_string(),
                reason: source.to_string(),
            },

            RecordError::Write {
                key,
                operation,
                source,
            } => Error::WriteFailed {
                key,
                operation: operation.to_string(),
                reason: source.to_string(),
            },

            RecordError::InvalidStateTransition { rid, from, to } => {
                Error::InvalidStateTransition {
                    rid,
                    from: from.map_or_else(|| "<unset>".to_string(), |s| s.to_string()),
                    to: to.to_string(),
                }
            }

            RecordError::Decode { key, source } => Error::Decode {
                key,
                reason: source.to_string(),
            },

            RecordError::Encode { key, source } => Error::Serialization {
                reason: format!("record for '{}': {}", key, source),
            },

            RecordError::Timestamp { key, tx_id, reason } => {
                Error::Timestamp { key, tx_id, reason }
            }

            RecordError::InvalidInput { reason } => Error::InvalidArgument { reason },

            RecordError::AlreadyExists { rid } => Error::RecordExists { rid },
        }
    }
}

/// Convert a record-layer result into an executor result.
pub(crate) fn convert_result<T>(result: RecordResult<T>) -> Result<T> {
    result.map_err(Error::from)
}
