//! The normalized message unit shared by both parsers.
//!
//! Every source parser converts its native format into [`Record`], so all
//! downstream aggregation and analysis works on one table shape regardless of
//! where a message came from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One normalized chat message.
///
/// Carries the calendar date and time-of-day the message was sent, the
/// canonical sender identity (post [`IdentityNormalizer`]), and the raw
/// message body. The body is deliberately untouched here; stopword and
/// punctuation cleanup is a downstream transform in [`analysis`].
///
/// [`IdentityNormalizer`]: crate::identity::IdentityNormalizer
/// [`analysis`]: crate::analysis
///
/// # Example
///
/// ```
/// use chatlens::Record;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let rec = Record::new(
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     "Alice",
///     "hello",
/// );
/// assert_eq!(rec.sender, "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date the message was sent (no time component).
    pub date: NaiveDate,

    /// Time-of-day the message was sent.
    pub time: NaiveTime,

    /// Canonical sender identity, post-normalization.
    pub sender: String,

    /// Raw message body. May contain newlines for multi-line messages.
    pub text: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            date,
            time,
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Combined date and time, useful for ordering comparisons.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "Alice",
            "hello",
        )
    }

    #[test]
    fn test_record_new() {
        let rec = sample();
        assert_eq!(rec.sender, "Alice");
        assert_eq!(rec.text, "hello");
        assert_eq!(rec.date.to_string(), "2020-01-01");
        assert_eq!(rec.time.to_string(), "09:00:00");
    }

    #[test]
    fn test_record_timestamp() {
        let rec = sample();
        assert_eq!(rec.timestamp().to_string(), "2020-01-01 09:00:00");
    }

    #[test]
    fn test_record_serialization() {
        let rec = sample();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("2020-01-01"));
        assert!(json.contains("Alice"));

        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rec);
    }
}
