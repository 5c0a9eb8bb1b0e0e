//! The source parser abstraction shared by both export formats.
//!
//! [`SourceKind`] is a closed enum: adding a third export format means adding
//! a variant, and every dispatch site is then checked at compile time. File
//! extensions map onto kinds through [`SourceKind::from_path`]; an
//! unrecognized extension is a fatal input error, not a skipped file.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::{SourceKind, SourceParser, create_parser};
//!
//! let parser = create_parser(SourceKind::Whatsapp, "Alice");
//! let transcript = parser.parse_str("01/01/2020, 9:00 am - Bob: hello")?;
//! assert_eq!(transcript.records.len(), 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Record;
use crate::error::{ChatlensError, Result};
use crate::summary::Summary;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// WhatsApp line-oriented TXT export.
    #[serde(alias = "wa")]
    Whatsapp,

    /// Messenger JSON export (Facebook data download).
    #[serde(alias = "fb")]
    Messenger,
}

impl SourceKind {
    /// Selects the source kind for an input file by extension.
    ///
    /// `.txt` maps to [`Whatsapp`](SourceKind::Whatsapp), `.json` to
    /// [`Messenger`](SourceKind::Messenger). Anything else is a fatal
    /// [`UnknownExtension`](ChatlensError::UnknownExtension) error.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Ok(SourceKind::Whatsapp),
            Some("json") => Ok(SourceKind::Messenger),
            _ => Err(ChatlensError::unknown_extension(path)),
        }
    }

    /// The file extension exports of this kind carry.
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::Whatsapp => "txt",
            SourceKind::Messenger => "json",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Whatsapp => write!(f, "WhatsApp"),
            SourceKind::Messenger => write!(f, "Messenger"),
        }
    }
}

/// The common output contract of both parsers.
///
/// `records` holds messages in source order (the aggregator applies the
/// global sort); `summary` holds everything that was recognized but is not a
/// message. Each parse produces exactly one `Transcript`, exclusively owned
/// by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Normalized message records in source order.
    pub records: Vec<Record>,

    /// Per-file non-message summary.
    pub summary: Summary,
}

/// Trait implemented by both source parsers.
///
/// A parser is constructed with the canonical owner identity (for resolving
/// the `"you"` self-reference) and owns its summary state for the duration of
/// one parse call.
pub trait SourceParser {
    /// Human-readable parser name (e.g. "WhatsApp").
    fn name(&self) -> &'static str;

    /// The source kind this parser handles.
    fn kind(&self) -> SourceKind;

    /// Parses an export file into the common output contract.
    ///
    /// Reads the whole file (exports are bounded in practice) and delegates
    /// to [`parse_str`](SourceParser::parse_str).
    fn parse(&self, path: &Path) -> Result<Transcript>;

    /// Parses export content already in memory.
    fn parse_str(&self, content: &str) -> Result<Transcript>;
}

/// Creates the parser for a source kind.
///
/// `owner` is the canonical identity substituted for `"you"` self-references.
pub fn create_parser(kind: SourceKind, owner: &str) -> Box<dyn SourceParser> {
    match kind {
        SourceKind::Whatsapp => Box::new(crate::parsers::WhatsappParser::new(owner)),
        SourceKind::Messenger => Box::new(crate::parsers::MessengerParser::new(owner)),
    }
}
