//! Property values.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The atomic datum being claimed about an entity.
///
/// Values are immutable, comparable, and hashable so they can live in the
/// allowed-value sets of a [`FederationProperty`](crate::FederationProperty).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A textual claim, e.g. `"completed"`.
    Text(String),

    /// A numeric claim, e.g. a score.
    Number(u64),
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<u64> for PropertyValue {
    fn from(number: u64) -> Self {
        PropertyValue::Number(number)
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(text) => Display::fmt(text, f),
            PropertyValue::Number(number) => Display::fmt(number, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_number_are_distinct() {
        assert_ne!(PropertyValue::from("7"), PropertyValue::from(7));
    }

    #[test]
    fn usable_as_set_member() {
        let mut set = std::collections::BTreeSet::new();
        set.insert(PropertyValue::from("completed"));
        set.insert(PropertyValue::from("completed"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&PropertyValue::from("completed")));
    }
}
