//! Native ledger timestamp
//!
//! The ledger stamps every committed transaction with a seconds + nanoseconds
//! pair relative to the Unix epoch (the protobuf `Timestamp` layout). Record
//! history exposes calendar timestamps instead, so each history item goes
//! through [`LedgerTimestamp::to_datetime`].
//!
//! ## Valid range
//!
//! Conversion succeeds only for `0001-01-01T00:00:00Z ..= 9999-12-31T23:59:59.999999999Z`
//! with `nanos` in `0..1_000_000_000`. Anything else is rejected rather than
//! clamped.
//!
//! ```
//! use howdog_core::LedgerTimestamp;
//!
//! let ts = LedgerTimestamp::new(1_600_000_000, 500);
//! let dt = ts.to_datetime().unwrap();
//! assert_eq!(dt.timestamp(), 1_600_000_000);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds of `0001-01-01T00:00:00Z` relative to the Unix epoch
pub const MIN_VALID_SECONDS: i64 = -62_135_596_800;

/// Seconds of `9999-12-31T23:59:59Z` relative to the Unix epoch
pub const MAX_VALID_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Timestamp as reported by the ledger for a committed transaction
///
/// ## Invariants
///
/// Construction does not validate; values come from an external ledger and
/// are checked at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerTimestamp {
    /// Seconds since Unix epoch
    pub seconds: i64,
    /// Sub-second nanoseconds, expected in `0..1_000_000_000`
    pub nanos: i32,
}

/// Why a ledger timestamp could not be converted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampRangeError {
    /// `nanos` outside `0..1_000_000_000`
    #[error("nanos {0} out of range [0, 1e9)")]
    Nanos(i32),
    /// `seconds` before year 1 or after year 9999
    #[error(
        "seconds {0} out of range [{min}, {max}]",
        min = MIN_VALID_SECONDS,
        max = MAX_VALID_SECONDS
    )]
    Seconds(i64),
}

impl LedgerTimestamp {
    /// Unix epoch
    pub const EPOCH: LedgerTimestamp = LedgerTimestamp {
        seconds: 0,
        nanos: 0,
    };

    /// Create from raw parts
    #[inline]
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        LedgerTimestamp { seconds, nanos }
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        LedgerTimestamp::from_datetime(Utc::now())
    }

    /// Create from a calendar timestamp
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        LedgerTimestamp {
            seconds: dt.timestamp(),
            // Always < 2e9 (leap second representation), fits in i32
            nanos: dt.timestamp_subsec_nanos() as i32,
        }
    }

    /// Check the timestamp lies in the representable calendar range
    pub fn validate(&self) -> Result<(), TimestampRangeError> {
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return Err(TimestampRangeError::Nanos(self.nanos));
        }
        if !(MIN_VALID_SECONDS..=MAX_VALID_SECONDS).contains(&self.seconds) {
            return Err(TimestampRangeError::Seconds(self.seconds));
        }
        Ok(())
    }

    /// Convert into a UTC calendar timestamp
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, TimestampRangeError> {
        self.validate()?;
        Utc.timestamp_opt(self.seconds, self.nanos as u32)
            .single()
            .ok_or(TimestampRangeError::Seconds(self.seconds))
    }
}

impl Default for LedgerTimestamp {
    fn default() -> Self {
        LedgerTimestamp::EPOCH
    }
}

impl fmt::Display for LedgerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl From<DateTime<Utc>> for LedgerTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        LedgerTimestamp::from_datetime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_epoch_converts() {
        let dt = LedgerTimestamp::EPOCH.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 0);
        assert_eq!(dt.year(), 1970);
    }

    #[test]
    fn test_subsecond_precision_kept() {
        let dt = LedgerTimestamp::new(1_700_000_000, 123_456_789)
            .to_datetime()
            .unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(dt.nanosecond(), 123_456_789);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let min = LedgerTimestamp::new(MIN_VALID_SECONDS, 0).to_datetime().unwrap();
        assert_eq!(min.year(), 1);

        let max = LedgerTimestamp::new(MAX_VALID_SECONDS, 999_999_999)
            .to_datetime()
            .unwrap();
        assert_eq!(max.year(), 9999);
    }

    #[test]
    fn test_seconds_out_of_range_rejected() {
        assert_eq!(
            LedgerTimestamp::new(MAX_VALID_SECONDS + 1, 0).to_datetime(),
            Err(TimestampRangeError::Seconds(MAX_VALID_SECONDS + 1))
        );
        assert_eq!(
            LedgerTimestamp::new(MIN_VALID_SECONDS - 1, 0).to_datetime(),
            Err(TimestampRangeError::Seconds(MIN_VALID_SECONDS - 1))
        );
    }

    #[test]
    fn test_nanos_out_of_range_rejected() {
        assert_eq!(
            LedgerTimestamp::new(0, -1).to_datetime(),
            Err(TimestampRangeError::Nanos(-1))
        );
        assert_eq!(
            LedgerTimestamp::new(0, 1_000_000_000).to_datetime(),
            Err(TimestampRangeError::Nanos(1_000_000_000))
        );
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt = Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(LedgerTimestamp::from(dt).to_datetime().unwrap(), dt);
    }

    #[test]
    fn test_display() {
        assert_eq!(LedgerTimestamp::new(12, 5).to_string(), "12.000000005");
    }
}
