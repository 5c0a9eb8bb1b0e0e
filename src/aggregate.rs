//! Cross-file aggregation into one chronological message table.
//!
//! Each input file is dispatched to the parser variant its extension selects,
//! parsed independently, and its records concatenated. The combined table is
//! then stably sorted by `(date, time)` ascending; cross-file ordering is
//! never assumed. Summaries are reported per file and never merged — callers
//! that want combined event analytics must do that themselves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Record;
use crate::error::Result;
use crate::parser::{SourceKind, create_parser};
use crate::summary::Summary;

/// One input file's non-message summary, reported independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// The input file this summary came from.
    pub path: PathBuf,

    /// Which parser variant handled it.
    pub kind: SourceKind,

    /// The per-file summary, untouched by aggregation.
    pub summary: Summary,
}

/// The aggregator's output: one merged record table plus per-file reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combined {
    /// All records from all files, sorted ascending by `(date, time)`.
    pub records: Vec<Record>,

    /// Per-file summaries in input order.
    pub reports: Vec<FileReport>,
}

/// Parses every input file and merges the results.
///
/// File extensions select the parser variant (`.txt` → WhatsApp, `.json` →
/// Messenger); an unrecognized extension aborts the whole run before any
/// partial output is produced. `owner` is the canonical identity substituted
/// for `"you"` self-references in every file.
///
/// The final sort is stable, so records sharing a `(date, time)` keep their
/// concatenation order.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::PathBuf;
/// use chatlens::aggregate::combine_files;
///
/// # fn main() -> chatlens::Result<()> {
/// let files = [PathBuf::from("chat.txt"), PathBuf::from("messages.json")];
/// let combined = combine_files(&files, "Alice")?;
/// println!("{} messages total", combined.records.len());
/// # Ok(())
/// # }
/// ```
pub fn combine_files<P: AsRef<Path>>(paths: &[P], owner: &str) -> Result<Combined> {
    let mut records: Vec<Record> = Vec::new();
    let mut reports: Vec<FileReport> = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let kind = SourceKind::from_path(path)?;
        let parser = create_parser(kind, owner);
        let transcript = parser.parse(path)?;

        records.extend(transcript.records);
        reports.push(FileReport {
            path: path.to_path_buf(),
            kind,
            summary: transcript.summary,
        });
    }

    records.sort_by_key(|r| (r.date, r.time));

    Ok(Combined { records, reports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_combines_both_variants_sorted() {
        let dir = TempDir::new().unwrap();
        let txt = write_fixture(
            &dir,
            "chat.txt",
            "02/01/2020, 9:00 am - Bob: whatsapp message",
        );
        // 1577869200000 ms = 2020-01-01 09:00:00, the earlier day
        let json = write_fixture(
            &dir,
            "messages.json",
            r#"{"participants": [], "messages": [
                {"sender_name": "Carol", "timestamp_ms": 1577869200000,
                 "type": "Generic", "content": "messenger message"}
            ]}"#,
        );

        let combined = combine_files(&[txt, json], "Alice").unwrap();
        assert_eq!(combined.records.len(), 2);
        assert_eq!(combined.records[0].text, "messenger message");
        assert_eq!(combined.records[1].text, "whatsapp message");
        assert_eq!(combined.reports.len(), 2);
        assert_eq!(combined.reports[0].kind, SourceKind::Whatsapp);
        assert_eq!(combined.reports[1].kind, SourceKind::Messenger);
    }

    #[test]
    fn test_adjacent_records_ordered() {
        let dir = TempDir::new().unwrap();
        let txt = write_fixture(
            &dir,
            "chat.txt",
            "03/01/2020, 9:00 am - Bob: c\n\
             01/01/2020, 9:00 am - Bob: a\n\
             02/01/2020, 11:00 pm - Bob: b",
        );

        let combined = combine_files(&[txt], "Alice").unwrap();
        for pair in combined.records.windows(2) {
            assert!(pair[0].timestamp() <= pair[1].timestamp());
        }
    }

    #[test]
    fn test_unknown_extension_aborts() {
        let dir = TempDir::new().unwrap();
        let csv = write_fixture(&dir, "chat.csv", "whatever");
        let err = combine_files(&[csv], "Alice").unwrap_err();
        assert!(err.is_unknown_extension());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = combine_files(&[PathBuf::from("/no/such/file.txt")], "Alice").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_summaries_not_merged() {
        let dir = TempDir::new().unwrap();
        let a = write_fixture(&dir, "a.txt", "01/01/2020, 9:00 am - Bob: one");
        let b = write_fixture(&dir, "b.txt", "01/01/2020, 9:01 am - Carol: two");

        let combined = combine_files(&[a, b], "Alice").unwrap();
        assert_eq!(combined.reports.len(), 2);
        match (&combined.reports[0].summary, &combined.reports[1].summary) {
            (Summary::Whatsapp(first), Summary::Whatsapp(second)) => {
                assert!(first.group_members.contains("Bob"));
                assert!(!first.group_members.contains("Carol"));
                assert!(second.group_members.contains("Carol"));
            }
            _ => panic!("expected WhatsApp summaries"),
        }
    }

    #[test]
    fn test_empty_input_list() {
        let combined = combine_files::<PathBuf>(&[], "Alice").unwrap();
        assert!(combined.records.is_empty());
        assert!(combined.reports.is_empty());
    }
}
