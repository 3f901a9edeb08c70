use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::inflector::singularize;

/// A user-entered tag.
///
/// Equality, ordering and hashing use the canonical identity, so "Food",
/// "foods" and "food!" all name the same tag.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Tag {
    name: String,
    canonical: String,
}

impl Tag {
    /// Builds a tag from raw text, which may carry a `:split` suffix.
    pub fn new(raw: &str) -> Self {
        Self {
            name: strip_split(raw).to_string(),
            canonical: canonicalize(raw),
        }
    }

    /// Display form: the raw text without any split suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// Reduces raw tag text to the identity used for grouping.
pub fn canonicalize(raw: &str) -> String {
    let without_whitespace: String = strip_split(raw)
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let without_punctuation: String = without_whitespace
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    if without_punctuation.is_empty() {
        return without_whitespace;
    }

    let singular = singularize(&without_punctuation);
    if singular.is_empty() {
        without_punctuation
    } else {
        singular
    }
}

fn strip_split(raw: &str) -> &str {
    raw.split_once(':').map_or(raw, |(name, _)| name)
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Tag::new(raw)
    }
}

impl From<String> for Tag {
    fn from(raw: String) -> Self {
        Tag::new(&raw)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.name
    }
}
