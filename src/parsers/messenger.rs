//! Messenger JSON export parser.
//!
//! Messenger exports (Facebook "Download Your Information") are already
//! tree-structured: a top-level object with `participants` and `messages`
//! arrays. This parser walks the entries, separates `Generic` text messages
//! from everything else, and applies the same identity normalization as the
//! WhatsApp parser.
//!
//! Unlike the WhatsApp parser, unrecognized keys on a content-less `Generic`
//! entry are skipped, not fatal. The asymmetry is intentional: the Messenger
//! key set is open-ended (stickers, reactions, geoblock flags, ...) while the
//! WhatsApp event vocabulary is closed. Skipped keys are logged at debug
//! level so they remain observable.

use std::fs;
use std::path::Path;

use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::Record;
use crate::error::{ChatlensError, Result};
use crate::identity::IdentityNormalizer;
use crate::parser::{SourceKind, SourceParser, Transcript};
use crate::summary::{MetaKind, MetaSummary, Summary};

const FORMAT: &str = "Messenger JSON";

/// Raw Messenger export structure for deserialization.
#[derive(Debug, Deserialize)]
struct MessengerExport {
    #[serde(default)]
    participants: Vec<Participant>,
    messages: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct Participant {
    name: String,
}

/// One raw message entry. `extra` collects the variably-present
/// attachment-indicating keys (`photos`, `videos`, `files`, ...).
#[derive(Debug, Deserialize)]
struct RawEntry {
    sender_name: Option<String>,
    timestamp_ms: i64,
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Parser for Messenger JSON exports.
///
/// # Example
///
/// ```rust
/// use chatlens::parsers::MessengerParser;
/// use chatlens::parser::SourceParser;
///
/// let json = r#"{
///     "participants": [{"name": "Alice"}, {"name": "Bob"}],
///     "messages": [
///         {"sender_name": "Bob", "timestamp_ms": 1577869200000,
///          "type": "Generic", "content": "hello"}
///     ]
/// }"#;
///
/// let parser = MessengerParser::new("Alice");
/// let transcript = parser.parse_str(json)?;
/// assert_eq!(transcript.records[0].text, "hello");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub struct MessengerParser {
    normalizer: IdentityNormalizer,
}

impl MessengerParser {
    /// Creates a parser with the given canonical owner identity.
    pub fn new(owner: impl AsRef<str>) -> Self {
        Self {
            normalizer: IdentityNormalizer::new(owner),
        }
    }

    /// The identity normalizer in use.
    pub fn normalizer(&self) -> &IdentityNormalizer {
        &self.normalizer
    }

    fn parse_content(&self, content: &str) -> Result<Transcript> {
        let export: MessengerExport = serde_json::from_str(content)?;
        log::debug!(
            "Messenger export lists {} participants: {}",
            export.participants.len(),
            export
                .participants
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut meta = MetaSummary::new();
        let mut stamped: Vec<(NaiveDateTime, Record)> = Vec::new();

        for entry in &export.messages {
            if entry.kind != "Generic" {
                match MetaKind::from_type_field(&entry.kind) {
                    Some(kind) => meta.increment(kind),
                    None => meta.increment_other(&entry.kind),
                }
                continue;
            }

            if let Some(text) = &entry.content {
                let ts = timestamp_from_ms(entry.timestamp_ms)?;
                let sender_raw = entry.sender_name.as_deref().ok_or_else(|| {
                    ChatlensError::invalid_format(FORMAT, "Generic entry missing sender_name")
                })?;
                let sender = self.normalizer.normalize(sender_raw);
                let record = Record::new(ts.date(), ts.time(), sender, text.clone());
                stamped.push((ts, record));
            } else {
                // Reaction, sticker, or attachment-only entry: count the
                // recognized keys, skip the rest.
                for key in entry.extra.keys() {
                    match MetaKind::from_entry_key(key) {
                        Some(kind) => meta.increment(kind),
                        None => log::debug!("skipping unrecognized Messenger entry key: {key}"),
                    }
                }
            }
        }

        // Messenger stores messages newest-first; sort by the combined
        // timestamp, then drop it from the output.
        stamped.sort_by_key(|(ts, _)| *ts);
        let records = stamped.into_iter().map(|(_, record)| record).collect();

        Ok(Transcript {
            records,
            summary: Summary::Messenger(meta),
        })
    }
}

impl SourceParser for MessengerParser {
    fn name(&self) -> &'static str {
        "Messenger"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Messenger
    }

    fn parse(&self, path: &Path) -> Result<Transcript> {
        let content = fs::read_to_string(path)?;
        self.parse_content(&content)
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        self.parse_content(content)
    }
}

/// Converts a millisecond epoch timestamp into a naive UTC date-time.
fn timestamp_from_ms(timestamp_ms: i64) -> Result<NaiveDateTime> {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            ChatlensError::invalid_format(
                FORMAT,
                format!("timestamp_ms out of range: {timestamp_ms}"),
            )
        })
}
