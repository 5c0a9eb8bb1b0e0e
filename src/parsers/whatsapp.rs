//! WhatsApp TXT export parser.
//!
//! WhatsApp exports are line-oriented: every message or system event begins
//! with a fixed-shape timestamp prefix (`DD/MM/YYYY, H:MM am -`), and a
//! message may continue over any number of following lines. The parser
//! locates every boundary occurrence in the blob and slices it into chunks,
//! so multi-line bodies stay attached to their originating boundary.
//!
//! Each chunk is then either a message (`<prefix> <sender>: <body>`), one of
//! the recognized system-event shapes (see [`events`](super::events)), or the
//! end-to-end-encryption banner WhatsApp inserts as the very first chunk.
//! Anything else is a fatal parse error; this parser is deliberately strict
//! where the Messenger parser is deliberately lenient.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::Record;
use crate::error::{ChatlensError, Result};
use crate::identity::IdentityNormalizer;
use crate::parser::{SourceKind, SourceParser, Transcript};
use crate::summary::{EventSummary, Summary};

use super::events::classify_event;

/// The timestamp shape that opens every chunk. Very unlikely to occur inside
/// a message body.
static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}, \d{1,2}:\d{2} [ap]m -").unwrap());

/// The stricter record shape: prefix plus `<sender>: `. The sender capture is
/// non-greedy and stops at the first line break, so an event chunk with a
/// colon on a later line cannot masquerade as a message.
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>\d{2}/\d{2}/\d{4}), (?P<time>\d{1,2}:\d{2} [ap]m) - (?P<sender>.*?): ")
        .unwrap()
});

/// Placeholder WhatsApp substitutes for attachments when exporting without
/// media.
const MEDIA_OMITTED: &str = "<Media omitted>";

/// Banner text inserted by the platform, valid only as the first chunk.
const ENCRYPTION_BANNER: &str = "Messages and calls are end-to-end encrypted.";

const FORMAT: &str = "WhatsApp TXT";

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatlens::parsers::WhatsappParser;
/// use chatlens::parser::SourceParser;
///
/// let parser = WhatsappParser::new("Alice");
/// let transcript = parser.parse_str("01/01/2020, 9:00 am - Bob: hello")?;
/// assert_eq!(transcript.records[0].text, "hello");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub struct WhatsappParser {
    normalizer: IdentityNormalizer,
}

impl WhatsappParser {
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
        let chunks = split_into_chunks(content)?;

        let mut summary = EventSummary::new();
        let mut records: Vec<Record> = Vec::new();

        for chunk in chunks {
            if let Some(caps) = RECORD_RE.captures(chunk) {
                let prefix_end = caps.get(0).map_or(0, |m| m.end());
                let body = chunk[prefix_end..].trim();

                if body == MEDIA_OMITTED {
                    summary.media_shares += 1;
                    continue;
                }

                let date = parse_date(&caps["date"])?;
                let time = parse_time(&caps["time"])?;
                let sender = self.normalizer.normalize(&caps["sender"]);
                records.push(Record::new(date, time, sender, body));
            } else {
                classify_event(chunk, &self.normalizer, &mut summary)?;
            }
        }

        // Everyone who ever sent a message is a group member, whether or not
        // an add event recorded them.
        summary
            .group_members
            .extend(records.iter().map(|r| r.sender.clone()));

        Ok(Transcript {
            records,
            summary: Summary::Whatsapp(summary),
        })
    }
}

impl SourceParser for WhatsappParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Whatsapp
    }

    fn parse(&self, path: &Path) -> Result<Transcript> {
        let content = fs::read_to_string(path)?;
        self.parse_content(&content)
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        self.parse_content(content)
    }
}

/// Slices the blob into message-or-event chunks at timestamp boundaries and
/// discards the platform banner if it opens the transcript.
fn split_into_chunks(content: &str) -> Result<Vec<&str>> {
    let starts: Vec<usize> = BOUNDARY_RE.find_iter(content).map(|m| m.start()).collect();
    if starts.is_empty() {
        return Err(ChatlensError::invalid_format(
            FORMAT,
            "no timestamp boundary found; is this a WhatsApp chat export?",
        ));
    }

    let mut chunks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());
        chunks.push(content[start..end].trim_end());
    }

    if chunks[0].contains(ENCRYPTION_BANNER) {
        chunks.remove(0);
    }

    Ok(chunks)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .map_err(|e| ChatlensError::invalid_format(FORMAT, format!("bad date '{raw}': {e}")))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%I:%M %p")
        .map_err(|e| ChatlensError::invalid_format(FORMAT, format!("bad time '{raw}': {e}")))
}
