//! Descriptive statistics over the merged record table.
//!
//! Everything here is a thin consumer of the normalized [`Record`] table:
//! word and emoji frequency per sender, overall activity metadata, and the
//! per-day / per-hour series a plotting frontend would render as a calendar
//! heatmap or density chart. No images are produced; the output is plain
//! data.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Record;

/// Common English stopwords removed by [`clean_text`].
static STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "but", "by", "can", "could", "did", "do", "does", "for", "from",
    "get", "got", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "im",
    "in", "into", "is", "it", "its", "just", "like", "me", "my", "no", "not", "now", "of", "on",
    "one", "only", "or", "our", "out", "over", "she", "so", "some", "than", "that", "the", "their",
    "them", "then", "there", "they", "this", "to", "up", "was", "we", "were", "what", "when",
    "which", "who", "will", "with", "would", "you", "your",
];

/// Matches single non-ASCII emoji characters. The ASCII subtraction drops
/// digits, `#`, and `*`, which carry the Emoji property but are not emoji in
/// running text.
static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Emoji}--\p{ASCII}]").unwrap());

/// Weekday names indexed by `Datelike::weekday().num_days_from_monday()`.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Lowercases, strips everything that is not a letter or space, and removes
/// stopwords.
///
/// ```
/// use chatlens::analysis::clean_text;
///
/// assert_eq!(clean_text("Hello, the WORLD!!"), "hello world");
/// ```
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let letters: String = lowered
        .chars()
        .filter(|c| c.is_alphabetic() || *c == ' ')
        .collect();
    letters
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word frequency per sender, over cleaned message text.
pub fn word_counts(records: &[Record]) -> BTreeMap<String, BTreeMap<String, u64>> {
    let mut per_sender: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for record in records {
        let counts = per_sender.entry(record.sender.clone()).or_default();
        for word in clean_text(&record.text).split_whitespace() {
            *counts.entry(word.to_string()).or_default() += 1;
        }
    }
    per_sender
}

/// Emoji frequency per sender, over raw message text.
pub fn emoji_counts(records: &[Record]) -> BTreeMap<String, BTreeMap<String, u64>> {
    let mut per_sender: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for record in records {
        let counts = per_sender.entry(record.sender.clone()).or_default();
        for m in EMOJI_RE.find_iter(&record.text) {
            *counts.entry(m.as_str().to_string()).or_default() += 1;
        }
    }
    per_sender
}

/// The `n` highest counts from a frequency table, descending, ties broken
/// alphabetically.
pub fn top_n(counts: &BTreeMap<String, u64>, n: usize) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(n);
    entries
}

/// Overall activity metadata for a merged record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMeta {
    /// Total messages across all senders.
    pub total_messages: usize,

    /// First calendar date with a message.
    pub first_date: NaiveDate,

    /// Last calendar date with a message.
    pub last_date: NaiveDate,

    /// Days between first and last date (0 for a single-day table).
    pub day_range: i64,

    /// Days in the observed range with no messages at all.
    pub days_missed: u64,

    /// Average messages per day over the range.
    pub avg_per_day: f64,

    /// Average messages per year over the range.
    pub avg_per_year: f64,

    /// Message counts per weekday, Monday first.
    pub weekday_counts: [u64; 7],

    /// Message counts per sender.
    pub per_sender: BTreeMap<String, u64>,
}

impl fmt::Display for GlobalMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total messages:  {}", self.total_messages)?;
        writeln!(
            f,
            "range:           {} to {} ({} days, {} silent)",
            self.first_date, self.last_date, self.day_range, self.days_missed
        )?;
        writeln!(
            f,
            "average:         {:.2}/day, {:.2}/year",
            self.avg_per_day, self.avg_per_year
        )?;
        writeln!(f, "by weekday:")?;
        for (name, count) in WEEKDAYS.iter().zip(self.weekday_counts) {
            writeln!(f, "  {name:<10} {count}")?;
        }
        writeln!(f, "by sender:")?;
        for (sender, count) in &self.per_sender {
            writeln!(f, "  {sender:<10} {count}")?;
        }
        Ok(())
    }
}

/// Computes [`GlobalMeta`] for a record table. Returns `None` when the table
/// is empty.
pub fn global_meta(records: &[Record]) -> Option<GlobalMeta> {
    let first_date = records.iter().map(|r| r.date).min()?;
    let last_date = records.iter().map(|r| r.date).max()?;
    let day_range = (last_date - first_date).num_days();

    let daily = daily_counts(records);
    let days_missed = daily.values().filter(|&&n| n == 0).count() as u64;

    let mut weekday_counts = [0u64; 7];
    let mut per_sender: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        weekday_counts[record.date.weekday().num_days_from_monday() as usize] += 1;
        *per_sender.entry(record.sender.clone()).or_default() += 1;
    }

    // A single-day table still spans one day of activity.
    let effective_days = day_range.max(1) as f64;
    let total = records.len();

    Some(GlobalMeta {
        total_messages: total,
        first_date,
        last_date,
        day_range,
        days_missed,
        avg_per_day: total as f64 / effective_days,
        avg_per_year: total as f64 / (effective_days / 365.0),
        weekday_counts,
        per_sender,
    })
}

/// Messages per calendar day over the full observed range, with explicit
/// zero entries for silent days. This is the input series for a calendar
/// heatmap.
pub fn daily_counts(records: &[Record]) -> BTreeMap<NaiveDate, u64> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let (Some(first), Some(last)) = (
        records.iter().map(|r| r.date).min(),
        records.iter().map(|r| r.date).max(),
    ) else {
        return counts;
    };

    let mut day = first;
    while day <= last {
        counts.insert(day, 0);
        let Some(next) = day.checked_add_days(Days::new(1)) else {
            break;
        };
        day = next;
    }
    for record in records {
        *counts.entry(record.date).or_default() += 1;
    }
    counts
}

/// Message counts per hour of day. This is the input series for a
/// time-of-day density chart.
pub fn hour_counts(records: &[Record]) -> [u64; 24] {
    let mut counts = [0u64; 24];
    for record in records {
        counts[record.time.hour() as usize] += 1;
    }
    counts
}
