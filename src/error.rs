//! Unified error types for chatlens.
//!
//! A single [`ChatlensError`] enum covers every failure in the library, so
//! callers can match on the kind of failure (unreadable file, unknown
//! extension, unrecognized event line, malformed JSON) instead of parsing
//! message strings.
//!
//! All variants are fatal from the parsers' point of view: nothing is retried
//! or silently skipped. The one intentionally lenient path — unrecognized
//! keys on content-less Messenger entries — never surfaces here at all; see
//! [`MessengerParser`](crate::parsers::MessengerParser).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// The source file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An input file's extension maps to neither source kind.
    ///
    /// Only `.txt` (WhatsApp) and `.json` (Messenger) are recognized.
    #[error("unknown file extension for '{}': expected .txt or .json", path.display())]
    UnknownExtension {
        /// The offending input path.
        path: PathBuf,
    },

    /// A WhatsApp event chunk matched none of the recognized shapes.
    ///
    /// The source format is considered violated; the parser aborts rather
    /// than silently dropping content.
    #[error("unrecognized WhatsApp event line: {line:?}")]
    UnrecognizedEvent {
        /// The full chunk that failed classification.
        line: String,
    },

    /// The Messenger export is not structurally valid JSON.
    #[error("malformed Messenger JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file structure doesn't match the expected export format.
    ///
    /// Covers, for example, a WhatsApp file with no timestamp boundary at all,
    /// or a Messenger entry whose epoch timestamp is out of range.
    #[error("invalid {format} format: {message}")]
    InvalidFormat {
        /// The format being parsed (e.g. "WhatsApp TXT", "Messenger JSON").
        format: &'static str,
        /// Description of what's wrong.
        message: String,
    },
}

impl ChatlensError {
    /// Creates an unknown-extension error.
    pub fn unknown_extension(path: impl Into<PathBuf>) -> Self {
        ChatlensError::UnknownExtension { path: path.into() }
    }

    /// Creates an unrecognized-event error.
    pub fn unrecognized_event(line: impl Into<String>) -> Self {
        ChatlensError::UnrecognizedEvent { line: line.into() }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is an unknown-extension error.
    pub fn is_unknown_extension(&self) -> bool {
        matches!(self, ChatlensError::UnknownExtension { .. })
    }

    /// Returns `true` if this is an unrecognized-event error.
    pub fn is_unrecognized_event(&self) -> bool {
        matches!(self, ChatlensError::UnrecognizedEvent { .. })
    }

    /// Returns `true` if this is a JSON structure error.
    pub fn is_json(&self) -> bool {
        matches!(self, ChatlensError::Json(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }
}
