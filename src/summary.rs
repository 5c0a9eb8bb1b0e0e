//! Per-file summaries of non-message content.
//!
//! Each parser owns one summary for the lifetime of a parse: created empty at
//! construction, mutated as the source is walked, read-only once parsing
//! completes. Summaries are never merged across files; the aggregator reports
//! each one independently.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-file summary, tagged by source kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Summary {
    /// Group administration events from a WhatsApp transcript.
    Whatsapp(EventSummary),
    /// Attachment/call category counts from a Messenger export.
    Messenger(MetaSummary),
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Whatsapp(s) => s.fmt(f),
            Summary::Messenger(s) => s.fmt(f),
        }
    }
}

/// Group metadata accumulated from WhatsApp system lines.
///
/// All counter maps use [`BTreeMap`] with explicit zero-states: an identity is
/// present only after its first occurrence, and nested maps are created at the
/// mutation site with `entry().or_default()`. Iteration order is therefore
/// deterministic, which keeps reports and tests stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    /// Current group name, empty until a "created group" or subject-change
    /// event is seen.
    pub group_name: String,

    /// Canonical identity of the group creator, empty if never seen.
    pub group_creator: String,

    /// Every canonical identity ever seen in the group: message senders plus
    /// anyone added through an event.
    pub group_members: BTreeSet<String>,

    /// Previous group names in chronological order of replacement.
    pub past_group_names: Vec<String>,

    /// Number of `<Media omitted>` placeholders dropped from the message
    /// stream.
    pub media_shares: u64,

    /// Subject changes per canonical identity.
    pub name_changers: BTreeMap<String, u64>,

    /// Icon changes per canonical identity.
    pub icon_changers: BTreeMap<String, u64>,

    /// Description changes per canonical identity.
    pub description_changers: BTreeMap<String, u64>,

    /// adder -> added person -> count.
    pub people_added: BTreeMap<String, BTreeMap<String, u64>>,

    /// remover -> removed person -> count.
    pub people_removed: BTreeMap<String, BTreeMap<String, u64>>,

    /// Self-removals per canonical identity.
    pub people_left: BTreeMap<String, u64>,
}

impl EventSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a group creation event.
    pub fn record_created(&mut self, creator: String, group_name: String) {
        self.group_creator = creator;
        self.group_name = group_name;
    }

    /// Records one person being added by `adder`.
    pub fn record_added(&mut self, adder: String, added: String) {
        *self
            .people_added
            .entry(adder)
            .or_default()
            .entry(added.clone())
            .or_default() += 1;
        self.group_members.insert(added);
    }

    /// Records one person being removed by `remover`.
    pub fn record_removed(&mut self, remover: String, removed: String) {
        *self
            .people_removed
            .entry(remover)
            .or_default()
            .entry(removed)
            .or_default() += 1;
    }

    /// Records a subject change, archiving the previous group name.
    pub fn record_subject_change(&mut self, changer: String, new_name: String) {
        *self.name_changers.entry(changer).or_default() += 1;
        let old = std::mem::replace(&mut self.group_name, new_name);
        self.past_group_names.push(old);
    }

    /// Records a member leaving on their own.
    pub fn record_left(&mut self, who: String) {
        *self.people_left.entry(who).or_default() += 1;
    }

    /// Records an icon change.
    pub fn record_icon_change(&mut self, who: String) {
        *self.icon_changers.entry(who).or_default() += 1;
    }

    /// Records a description change.
    pub fn record_description_change(&mut self, who: String) {
        *self.description_changers.entry(who).or_default() += 1;
    }

    /// Total number of event occurrences accumulated.
    ///
    /// One "created group" line counts once; added/removed lines count once
    /// per person in their list, matching how the accumulators are bumped.
    pub fn occurrence_count(&self) -> u64 {
        let created = u64::from(!self.group_creator.is_empty());
        let nested_sum = |m: &BTreeMap<String, BTreeMap<String, u64>>| {
            m.values().flat_map(BTreeMap::values).sum::<u64>()
        };
        created
            + nested_sum(&self.people_added)
            + nested_sum(&self.people_removed)
            + self.name_changers.values().sum::<u64>()
            + self.icon_changers.values().sum::<u64>()
            + self.description_changers.values().sum::<u64>()
            + self.people_left.values().sum::<u64>()
    }
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "group name:           {}", self.group_name)?;
        writeln!(f, "creator:              {}", self.group_creator)?;
        writeln!(f, "media shares:         {}", self.media_shares)?;
        writeln!(
            f,
            "members:              {}",
            self.group_members
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(
            f,
            "past group names:     {}",
            self.past_group_names.join(", ")
        )?;
        write_counts(f, "subject changes", &self.name_changers)?;
        write_counts(f, "icon changes", &self.icon_changers)?;
        write_counts(f, "description changes", &self.description_changers)?;
        write_counts(f, "left", &self.people_left)?;
        write_nested(f, "added", &self.people_added)?;
        write_nested(f, "removed", &self.people_removed)?;
        Ok(())
    }
}

fn write_counts(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    counts: &BTreeMap<String, u64>,
) -> fmt::Result {
    if counts.is_empty() {
        return Ok(());
    }
    writeln!(f, "{label}:")?;
    for (who, n) in counts {
        writeln!(f, "  {who}: {n}")?;
    }
    Ok(())
}

fn write_nested(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    counts: &BTreeMap<String, BTreeMap<String, u64>>,
) -> fmt::Result {
    if counts.is_empty() {
        return Ok(());
    }
    writeln!(f, "{label}:")?;
    for (actor, inner) in counts {
        for (object, n) in inner {
            writeln!(f, "  {actor} -> {object}: {n}")?;
        }
    }
    Ok(())
}

/// Fixed category keys for Messenger non-text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    /// Voice/video call entries (`type: "Call"`).
    Call,
    /// Shared links and posts.
    Share,
    /// Video attachments.
    Video,
    /// Photo attachments.
    Photo,
    /// File attachments.
    File,
}

impl MetaKind {
    /// Maps a non-`Generic` `type` field value onto a category.
    pub fn from_type_field(value: &str) -> Option<Self> {
        match value {
            "Call" => Some(MetaKind::Call),
            "Share" => Some(MetaKind::Share),
            _ => None,
        }
    }

    /// Maps an attachment-indicating entry key onto a category.
    pub fn from_entry_key(key: &str) -> Option<Self> {
        match key {
            "videos" => Some(MetaKind::Video),
            "photos" => Some(MetaKind::Photo),
            "files" => Some(MetaKind::File),
            "share" => Some(MetaKind::Share),
            "call" => Some(MetaKind::Call),
            _ => None,
        }
    }

    /// Category label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            MetaKind::Call => "call",
            MetaKind::Share => "share",
            MetaKind::Video => "video",
            MetaKind::Photo => "photo",
            MetaKind::File => "file",
        }
    }
}

/// Occurrence counts of non-text Messenger content.
///
/// The fixed categories always appear in reports, at zero if never seen.
/// Non-`Generic` `type` values outside the fixed set are tallied under
/// [`other`](MetaSummary::other) keyed by the raw type string rather than
/// aborting the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSummary {
    counts: BTreeMap<MetaKind, u64>,
    other: BTreeMap<String, u64>,
}

impl MetaSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter for a category.
    pub fn increment(&mut self, kind: MetaKind) {
        *self.counts.entry(kind).or_default() += 1;
    }

    /// Tallies an unrecognized non-`Generic` type value.
    pub fn increment_other(&mut self, type_value: &str) {
        *self.other.entry(type_value.to_string()).or_default() += 1;
    }

    /// Count for one category.
    pub fn count(&self, kind: MetaKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Unrecognized type values and their counts.
    pub fn other(&self) -> &BTreeMap<String, u64> {
        &self.other
    }

    /// Total occurrences across all categories, recognized or not.
    pub fn total(&self) -> u64 {
        self.counts.values().sum::<u64>() + self.other.values().sum::<u64>()
    }
}

impl fmt::Display for MetaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in [
            MetaKind::Call,
            MetaKind::Share,
            MetaKind::Video,
            MetaKind::Photo,
            MetaKind::File,
        ] {
            writeln!(f, "{:<10} {}", kind.label(), self.count(kind))?;
        }
        for (name, n) in &self.other {
            writeln!(f, "{name:<10} {n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_summary_created() {
        let mut s = EventSummary::new();
        s.record_created("Alice".into(), "Family".into());
        assert_eq!(s.group_creator, "Alice");
        assert_eq!(s.group_name, "Family");
        assert_eq!(s.occurrence_count(), 1);
    }

    #[test]
    fn test_event_summary_added_tracks_members() {
        let mut s = EventSummary::new();
        s.record_added("Alice".into(), "Bob".into());
        s.record_added("Alice".into(), "Bob".into());
        s.record_added("Alice".into(), "Carol".into());
        assert_eq!(s.people_added["Alice"]["Bob"], 2);
        assert!(s.group_members.contains("Bob"));
        assert!(s.group_members.contains("Carol"));
        assert_eq!(s.occurrence_count(), 3);
    }

    #[test]
    fn test_event_summary_subject_change_archives_name() {
        let mut s = EventSummary::new();
        s.record_created("Alice".into(), "Family".into());
        s.record_subject_change("Bob".into(), "The Fam".into());
        assert_eq!(s.group_name, "The Fam");
        assert_eq!(s.past_group_names, vec!["Family".to_string()]);
        assert_eq!(s.name_changers["Bob"], 1);
    }

    #[test]
    fn test_event_summary_occurrence_count_covers_all() {
        let mut s = EventSummary::new();
        s.record_created("Alice".into(), "G".into());
        s.record_added("Alice".into(), "Bob".into());
        s.record_removed("Alice".into(), "Bob".into());
        s.record_subject_change("Bob".into(), "G2".into());
        s.record_left("Carol".into());
        s.record_icon_change("Alice".into());
        s.record_description_change("Alice".into());
        assert_eq!(s.occurrence_count(), 7);
    }

    #[test]
    fn test_event_summary_display_stable() {
        let mut s = EventSummary::new();
        s.record_created("Alice".into(), "Family".into());
        s.record_added("Alice".into(), "Bob".into());
        let text = s.to_string();
        assert!(text.contains("group name:           Family"));
        assert!(text.contains("Alice -> Bob: 1"));
    }

    #[test]
    fn test_meta_kind_mappings() {
        assert_eq!(MetaKind::from_type_field("Call"), Some(MetaKind::Call));
        assert_eq!(MetaKind::from_type_field("Share"), Some(MetaKind::Share));
        assert_eq!(MetaKind::from_type_field("Generic"), None);
        assert_eq!(MetaKind::from_entry_key("photos"), Some(MetaKind::Photo));
        assert_eq!(MetaKind::from_entry_key("videos"), Some(MetaKind::Video));
        assert_eq!(MetaKind::from_entry_key("files"), Some(MetaKind::File));
        assert_eq!(MetaKind::from_entry_key("share"), Some(MetaKind::Share));
        assert_eq!(MetaKind::from_entry_key("call"), Some(MetaKind::Call));
        assert_eq!(MetaKind::from_entry_key("sender_name"), None);
    }

    #[test]
    fn test_meta_summary_counts() {
        let mut s = MetaSummary::new();
        s.increment(MetaKind::Call);
        s.increment(MetaKind::Call);
        s.increment(MetaKind::Photo);
        s.increment_other("Subscribe");
        assert_eq!(s.count(MetaKind::Call), 2);
        assert_eq!(s.count(MetaKind::Photo), 1);
        assert_eq!(s.count(MetaKind::Video), 0);
        assert_eq!(s.other()["Subscribe"], 1);
        assert_eq!(s.total(), 4);
    }

    #[test]
    fn test_meta_summary_display_shows_zero_categories() {
        let s = MetaSummary::new();
        let text = s.to_string();
        assert!(text.contains("call"));
        assert!(text.contains("file"));
    }

    #[test]
    fn test_summary_enum_display() {
        let s = Summary::Messenger(MetaSummary::new());
        assert!(s.to_string().contains("photo"));
    }
}
