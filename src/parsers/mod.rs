//! Source parsers for the two supported export formats.
//!
//! - [`WhatsappParser`] — line-oriented TXT exports, chunked on the fixed
//!   timestamp prefix, with system-event classification
//! - [`MessengerParser`] — JSON exports, already tree-structured
//!
//! Both implement [`SourceParser`](crate::parser::SourceParser) and share the
//! same normalization contract: a [`Record`](crate::Record) table plus a
//! per-file [`Summary`](crate::summary::Summary).

mod events;
mod messenger;
mod whatsapp;

pub use messenger::MessengerParser;
pub use whatsapp::WhatsappParser;
