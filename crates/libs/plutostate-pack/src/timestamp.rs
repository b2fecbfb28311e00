use time::OffsetDateTime;

/// Largest integer a 64-bit float represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Largest distance from the epoch, in milliseconds, of a representable instant.
pub const MAX_DATE_MILLIS: i64 = 8_640_000_000_000_000;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// A date/time instant with millisecond precision.
///
/// `Invalid` is the sentinel produced when a date cannot be represented, for
/// example when the decoding host lacks 64-bit integers. It cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Millis(i64),
    Invalid,
}

impl Timestamp {
    /// Builds a timestamp from milliseconds since the Unix epoch. Counts past
    /// [`MAX_DATE_MILLIS`] in either direction are `Invalid`.
    pub fn from_millis(millis: i64) -> Self {
        if millis.unsigned_abs() > MAX_DATE_MILLIS.unsigned_abs() {
            Self::Invalid
        } else {
            Self::Millis(millis)
        }
    }

    pub fn now() -> Self {
        Self::from(OffsetDateTime::now_utc())
    }

    pub fn millis(&self) -> Option<i64> {
        match self {
            Self::Millis(millis) => Some(*millis),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Millis(_))
    }

    /// Converts to a UTC `OffsetDateTime`. Returns `None` for `Invalid` and for
    /// instants outside the calendar range supported by `time`.
    pub fn to_offset_date_time(&self) -> Option<OffsetDateTime> {
        let millis = self.millis()?;
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * NANOS_PER_MILLI).ok()
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        let millis = value.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI);
        i64::try_from(millis).map(Self::from_millis).unwrap_or(Self::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::{Timestamp, MAX_DATE_MILLIS};
    use time::macros::datetime;

    #[test]
    fn millis_past_calendar_range_are_invalid() {
        assert_eq!(Timestamp::from_millis(MAX_DATE_MILLIS), Timestamp::Millis(MAX_DATE_MILLIS));
        assert_eq!(Timestamp::from_millis(-MAX_DATE_MILLIS), Timestamp::Millis(-MAX_DATE_MILLIS));
        assert_eq!(Timestamp::from_millis(MAX_DATE_MILLIS + 1), Timestamp::Invalid);
        assert_eq!(Timestamp::from_millis(i64::MIN), Timestamp::Invalid);
    }

    #[test]
    fn converts_offset_date_time_at_millisecond_precision() {
        let instant = datetime!(2023-11-14 22:13:20.123456 UTC);
        let timestamp = Timestamp::from(instant);
        assert_eq!(timestamp, Timestamp::Millis(1_700_000_000_123));

        let back = timestamp.to_offset_date_time().expect("in calendar range");
        assert_eq!(back, datetime!(2023-11-14 22:13:20.123 UTC));
    }

    #[test]
    fn pre_epoch_instants_round_down() {
        let instant = datetime!(1969-12-31 23:59:59.9995 UTC);
        assert_eq!(Timestamp::from(instant), Timestamp::Millis(-1));
    }

    #[test]
    fn invalid_has_no_calendar_instant() {
        assert!(Timestamp::Invalid.to_offset_date_time().is_none());
        assert!(!Timestamp::Invalid.is_valid());
    }
}
