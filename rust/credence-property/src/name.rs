//! Hierarchical property names.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A hierarchical property identifier, e.g. `university.scores.engineering`.
///
/// Names are ordered sequences of string segments. Equality is segment-wise.
/// A name *covers* another when its segments form a prefix of the other's
/// segments, which is what lets a grant on `university` govern
/// `university.scores.engineering`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyName {
    segments: Vec<String>,
}

impl PropertyName {
    /// Creates a name from pre-split segments.
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Getter for the name's segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if this name's segments form a prefix of `other`'s.
    ///
    /// `other` may be equal-length or longer; a shorter `other` is never
    /// covered.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.segments.len() > other.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(ours, theirs)| ours == theirs)
    }
}

impl From<&str> for PropertyName {
    fn from(dotted: &str) -> Self {
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }
}

impl From<String> for PropertyName {
    fn from(dotted: String) -> Self {
        Self::from(dotted.as_str())
    }
}

impl From<Vec<String>> for PropertyName {
    fn from(segments: Vec<String>) -> Self {
        Self::new(segments)
    }
}

impl Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_dots() {
        let name = PropertyName::from("university.scores.engineering");
        assert_eq!(name.segments(), ["university", "scores", "engineering"]);
    }

    #[test]
    fn prefix_covers_longer_names() {
        let prefix = PropertyName::from("a.b");
        assert!(prefix.is_prefix_of(&PropertyName::from("a.b.c")));
        assert!(prefix.is_prefix_of(&PropertyName::from("a.b")));
    }

    #[test]
    fn diverging_segment_is_not_covered() {
        let prefix = PropertyName::from("a.b");
        assert!(!prefix.is_prefix_of(&PropertyName::from("a.d")));
    }

    #[test]
    fn shorter_name_is_not_covered() {
        let prefix = PropertyName::from("a.b");
        assert!(!prefix.is_prefix_of(&PropertyName::from("a")));
    }

    #[test]
    fn display_joins_with_dots() {
        let name = PropertyName::new(vec!["deg".into(), "bachelor".into()]);
        assert_eq!(name.to_string(), "deg.bachelor");
    }
}
