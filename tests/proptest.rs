//! Property-based tests for chatlens.
//!
//! These tests generate random inputs to find edge cases.

use proptest::prelude::*;

use chatlens::IdentityNormalizer;
use chatlens::analysis::{clean_text, daily_counts, global_meta, hour_counts};
use chatlens::prelude::*;
use chrono::{NaiveDate, NaiveTime};

/// Generate a random Record using fast strategies (no regex!)
fn arb_record() -> impl Strategy<Value = Record> {
    (
        // Fast: select from predefined senders
        prop::sample::select(vec![
            "Alice".to_string(),
            "Bob".to_string(),
            "Charlie".to_string(),
            "User123".to_string(),
        ]),
        prop::sample::select(vec![
            "Hello".to_string(),
            "Hi there!".to_string(),
            "How are you?".to_string(),
            "🎉🔥 emoji".to_string(),
            String::new(),
            "note: remember this".to_string(),
        ]),
        0u32..1000,  // days after 2020-01-01
        0u32..86400, // seconds into the day
    )
        .prop_map(|(sender, text, day_offset, secs)| {
            let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
                + chrono::Days::new(u64::from(day_offset));
            let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap();
            Record::new(date, time, sender, text)
        })
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // NORMALIZER PROPERTIES
    // ============================================

    /// Normalization is idempotent
    #[test]
    fn normalize_idempotent(owner in "[A-Za-z0-9 ]{1,20}", name in "[A-Za-z0-9 !?.]{0,20}") {
        let normalizer = IdentityNormalizer::new(&owner);
        let once = normalizer.normalize(&name);
        let twice = normalizer.normalize(&once);
        prop_assert_eq!(once, twice);
    }

    /// The normalized output never contains punctuation
    #[test]
    fn normalize_output_is_clean(name in ".{0,30}") {
        let normalizer = IdentityNormalizer::new("Alice");
        let out = normalizer.normalize(&name);
        prop_assert!(out.chars().all(|c| c.is_alphanumeric() || c == ' '));
    }

    // ============================================
    // CLEANING PROPERTIES
    // ============================================

    /// Cleaned text is lowercase letters and single spaces only
    #[test]
    fn clean_text_is_canonical(text in ".{0,60}") {
        let cleaned = clean_text(&text);
        prop_assert!(cleaned.chars().all(|c| c.is_alphabetic() || c == ' '));
        prop_assert!(!cleaned.contains("  "));
        prop_assert_eq!(cleaned.clone(), cleaned.to_lowercase());
    }

    /// Cleaning is idempotent
    #[test]
    fn clean_text_idempotent(text in ".{0,60}") {
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once);
    }

    // ============================================
    // ANALYSIS PROPERTIES
    // ============================================

    /// Per-day, per-hour, and per-sender counts all sum to the table size
    #[test]
    fn count_series_conserve_totals(records in arb_records(30)) {
        let total = records.len() as u64;
        prop_assert_eq!(daily_counts(&records).values().sum::<u64>(), total);
        prop_assert_eq!(hour_counts(&records).iter().sum::<u64>(), total);
        if let Some(meta) = global_meta(&records) {
            prop_assert_eq!(meta.per_sender.values().sum::<u64>(), total);
            prop_assert_eq!(meta.weekday_counts.iter().sum::<u64>(), total);
        } else {
            prop_assert!(records.is_empty());
        }
    }

    /// The daily series has no gaps inside the observed range
    #[test]
    fn daily_counts_contiguous(records in arb_records(30)) {
        let daily = daily_counts(&records);
        let days: Vec<_> = daily.keys().copied().collect();
        for pair in days.windows(2) {
            prop_assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }
}
