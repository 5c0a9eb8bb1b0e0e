//! Canonical sender identity resolution.
//!
//! Chat exports spell the transcript owner as a literal `"you"` (any casing),
//! and decorate names with emoji or punctuation. [`IdentityNormalizer`] maps
//! every raw display name onto one canonical identity so the same physical
//! person always aggregates under one key, regardless of source or spelling.

use serde::{Deserialize, Serialize};

/// Resolves raw display names into canonical identities.
///
/// Normalization strips every character that is not alphanumeric or a space,
/// trims the result, and replaces a case-insensitive `"you"` with the
/// configured owner identity. Both parsers and every event accumulator apply
/// this identically.
///
/// The owner string itself is passed through the same cleanup at construction,
/// which makes [`normalize`](IdentityNormalizer::normalize) idempotent:
/// normalizing an already-normalized name returns it unchanged.
///
/// # Example
///
/// ```
/// use chatlens::IdentityNormalizer;
///
/// let norm = IdentityNormalizer::new("Alice");
/// assert_eq!(norm.normalize("You"), "Alice");
/// assert_eq!(norm.normalize("Bob 🎉"), "Bob");
/// assert_eq!(norm.normalize("Alice"), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityNormalizer {
    owner: String,
}

impl IdentityNormalizer {
    /// Creates a normalizer for the given transcript owner.
    ///
    /// The owner name is cleaned with the same character rules applied during
    /// normalization, so the result of substituting it is always in canonical
    /// form.
    pub fn new(owner: impl AsRef<str>) -> Self {
        Self {
            owner: clean(owner.as_ref()),
        }
    }

    /// The canonical owner identity substituted for self-references.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Normalizes a raw display name into a canonical identity.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        if cleaned.eq_ignore_ascii_case("you") {
            self.owner.clone()
        } else {
            cleaned
        }
    }
}

/// Keeps alphanumeric characters and spaces, trims the ends.
fn clean(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    kept.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_reference_any_case() {
        let norm = IdentityNormalizer::new("Alice");
        assert_eq!(norm.normalize("you"), "Alice");
        assert_eq!(norm.normalize("You"), "Alice");
        assert_eq!(norm.normalize("YOU "), "Alice");
    }

    #[test]
    fn test_strips_non_alphanumeric() {
        let norm = IdentityNormalizer::new("Alice");
        assert_eq!(norm.normalize("Bob 🎉"), "Bob");
        assert_eq!(norm.normalize("~Charlie!"), "Charlie");
        assert_eq!(norm.normalize("  Dana  "), "Dana");
    }

    #[test]
    fn test_keeps_interior_spaces_and_digits() {
        let norm = IdentityNormalizer::new("Alice");
        assert_eq!(norm.normalize("Bob Jr 2"), "Bob Jr 2");
    }

    #[test]
    fn test_idempotent() {
        let norm = IdentityNormalizer::new("Alice");
        let once = norm.normalize("~Bob!");
        assert_eq!(norm.normalize(&once), once);

        let owner_once = norm.normalize("You");
        assert_eq!(norm.normalize(&owner_once), owner_once);
    }

    #[test]
    fn test_owner_is_cleaned_at_construction() {
        let norm = IdentityNormalizer::new(" Alice 🦉 ");
        assert_eq!(norm.owner(), "Alice");
        assert_eq!(norm.normalize("you"), "Alice");
    }

    #[test]
    fn test_non_ascii_names_survive() {
        let norm = IdentityNormalizer::new("Alice");
        assert_eq!(norm.normalize("Мама"), "Мама");
    }
}
