//! WhatsApp system-event classification.
//!
//! Event chunks are tested against the recognized shapes in a fixed order;
//! the first shape whose marker substring is present wins. The shapes are not
//! mutually exclusive by construction ("Alice added Bob" also contains "add"),
//! so the order below defines precedence and must not be rearranged.
//!
//! Any chunk matching none of the shapes is a fatal
//! [`UnrecognizedEvent`](crate::error::ChatlensError::UnrecognizedEvent):
//! the source format is considered violated and parsing aborts rather than
//! silently dropping content.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ChatlensError, Result};
use crate::identity::IdentityNormalizer;
use crate::summary::EventSummary;

static CREATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (?P<actor>.*?) created group").unwrap());
static QUOTED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(?P<name>.+)""#).unwrap());
static ADDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (?P<rest>.* added .*)").unwrap());
static WAS_ADDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (?P<added>.*) was added").unwrap());
static REMOVED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (?P<rest>.* removed .*)").unwrap());
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"- (?P<actor>.*) changed the subject from ".*" to "(?P<new>.*)""#).unwrap()
});
static LEFT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"- (?P<who>.*) left").unwrap());
static ICON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (?P<actor>.*?) changed this group's icon").unwrap());
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (?P<actor>.*?) changed the group description").unwrap());

/// Classifies one event chunk and updates the summary accumulators.
///
/// `chunk` is the full chunk including its timestamp prefix. Every identity
/// stored in the summary — actors and objects alike — goes through the
/// normalizer first.
pub(crate) fn classify_event(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    if chunk.contains("created group") {
        classify_created(chunk, normalizer, summary)
    } else if chunk.contains("added") {
        classify_added(chunk, normalizer, summary)
    } else if chunk.contains("removed") {
        classify_removed(chunk, normalizer, summary)
    } else if chunk.contains("changed the subject") {
        classify_subject(chunk, normalizer, summary)
    } else if chunk.contains("left") {
        classify_left(chunk, normalizer, summary)
    } else if chunk.contains("changed this group's icon") {
        classify_icon(chunk, normalizer, summary)
    } else if chunk.contains("changed the group description") {
        classify_description(chunk, normalizer, summary)
    } else {
        Err(ChatlensError::unrecognized_event(chunk))
    }
}

fn classify_created(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    let caps = CREATED_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    let creator = normalizer.normalize(&caps["actor"]);

    let name_caps = QUOTED_NAME_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    let group_name = name_caps["name"].trim().to_string();

    summary.record_created(creator, group_name);
    Ok(())
}

fn classify_added(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    // Primary shape: "<actor> added <names>". When the export spells it as
    // "<names> was added" instead, fall back to treating the transcript owner
    // as the actor. The fallback is a recovered condition, not an error.
    let (actor, added_list) = if let Some(caps) = ADDED_RE.captures(chunk) {
        let rest = caps["rest"].to_string();
        match rest.split_once(" added ") {
            Some((actor, added)) => (normalizer.normalize(actor), added.to_string()),
            None => return Err(ChatlensError::unrecognized_event(chunk)),
        }
    } else if let Some(caps) = WAS_ADDED_RE.captures(chunk) {
        (normalizer.owner().to_string(), caps["added"].to_string())
    } else {
        return Err(ChatlensError::unrecognized_event(chunk));
    };

    for person in split_name_list(&added_list) {
        summary.record_added(actor.clone(), normalizer.normalize(person));
    }
    Ok(())
}

fn classify_removed(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    let caps = REMOVED_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    let rest = caps["rest"].to_string();
    let (remover, removed_list) = rest
        .split_once(" removed ")
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    let remover = normalizer.normalize(remover);

    for person in split_name_list(removed_list) {
        summary.record_removed(remover.clone(), normalizer.normalize(person));
    }
    Ok(())
}

fn classify_subject(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    let caps = SUBJECT_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    let changer = normalizer.normalize(&caps["actor"]);
    let new_name = caps["new"].to_string();
    summary.record_subject_change(changer, new_name);
    Ok(())
}

fn classify_left(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    let caps = LEFT_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    summary.record_left(normalizer.normalize(&caps["who"]));
    Ok(())
}

fn classify_icon(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    let caps = ICON_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    summary.record_icon_change(normalizer.normalize(&caps["actor"]));
    Ok(())
}

fn classify_description(
    chunk: &str,
    normalizer: &IdentityNormalizer,
    summary: &mut EventSummary,
) -> Result<()> {
    let caps = DESCRIPTION_RE
        .captures(chunk)
        .ok_or_else(|| ChatlensError::unrecognized_event(chunk))?;
    summary.record_description_change(normalizer.normalize(&caps["actor"]));
    Ok(())
}

/// Splits an added/removed list on the word "and".
fn split_name_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(" and ").map(str::trim).filter(|s| !s.is_empty())
}
