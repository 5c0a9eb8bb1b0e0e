//! # Chatlens
//!
//! A Rust library for turning chat exports into a single normalized message
//! table plus descriptive statistics.
//!
//! ## Overview
//!
//! Chatlens ingests two export formats:
//! - **WhatsApp** — line-oriented TXT exports (`DD/MM/YYYY, H:MM am -` prefixed)
//! - **Messenger** — JSON exports (Facebook "Download Your Information")
//!
//! Both parsers produce the same output contract: a [`Record`] table
//! (date, time, sender, text) in source order, plus a per-file
//! [`Summary`](summary::Summary) of the non-message content (group
//! administration events for WhatsApp, attachment/call categories for
//! Messenger). The [`aggregate`] module merges any number of parsed files into
//! one chronologically sorted table, and [`analysis`] derives word, emoji, and
//! activity statistics from it.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::parser::{SourceKind, SourceParser, create_parser};
//!
//! fn main() -> chatlens::Result<()> {
//!     let parser = create_parser(SourceKind::Whatsapp, "Alice");
//!     let transcript = parser.parse_str("01/01/2020, 9:00 am - Bob: hello")?;
//!
//!     assert_eq!(transcript.records.len(), 1);
//!     assert_eq!(transcript.records[0].sender, "Bob");
//!     Ok(())
//! }
//! ```
//!
//! ## Combining files
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use chatlens::aggregate::combine_files;
//!
//! # fn main() -> chatlens::Result<()> {
//! let files = [PathBuf::from("family_chat.txt"), PathBuf::from("messages.json")];
//! let combined = combine_files(&files, "Alice")?;
//!
//! for report in &combined.reports {
//!     println!("{}:\n{}", report.path.display(), report.summary);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`record`] — [`Record`], the normalized message unit
//! - [`identity`] — [`IdentityNormalizer`], canonical sender resolution
//! - [`parser`] — [`SourceKind`](parser::SourceKind), the [`SourceParser`](parser::SourceParser)
//!   trait, and [`create_parser`](parser::create_parser)
//! - [`parsers`] — [`WhatsappParser`](parsers::WhatsappParser) and
//!   [`MessengerParser`](parsers::MessengerParser)
//! - [`summary`] — per-file [`EventSummary`](summary::EventSummary) and
//!   [`MetaSummary`](summary::MetaSummary)
//! - [`aggregate`] — [`combine_files`](aggregate::combine_files)
//! - [`analysis`] — word/emoji counts, global metadata, activity series
//! - [`error`] — [`ChatlensError`] and [`Result`]

pub mod aggregate;
pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod identity;
pub mod parser;
pub mod parsers;
pub mod record;
pub mod summary;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use identity::IdentityNormalizer;
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;

    pub use crate::error::{ChatlensError, Result};

    pub use crate::identity::IdentityNormalizer;

    pub use crate::parser::{SourceKind, SourceParser, Transcript, create_parser};

    pub use crate::parsers::{MessengerParser, WhatsappParser};

    pub use crate::summary::{EventSummary, MetaSummary, Summary};

    pub use crate::aggregate::{Combined, FileReport, combine_files};
}
