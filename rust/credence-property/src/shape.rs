//! Shape predicates over property values.

use crate::PropertyValue;
use serde::{Deserialize, Serialize};

/// A predicate constraining acceptable property values.
///
/// String predicates apply to [`PropertyValue::Text`], numeric predicates to
/// [`PropertyValue::Number`]. Matching a value of the wrong kind is `false`,
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyShape {
    /// Text starts with the given pattern.
    StartsWith(String),

    /// Text ends with the given pattern.
    EndsWith(String),

    /// Text contains the given pattern anywhere. The empty pattern matches
    /// every text.
    Contains(String),

    /// Number is strictly greater than the given bound.
    GreaterThan(u64),

    /// Number is strictly lower than the given bound.
    LowerThan(u64),
}

impl PropertyShape {
    /// Evaluates this predicate against a value.
    #[must_use]
    pub fn matches(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (PropertyShape::StartsWith(pattern), PropertyValue::Text(text)) => {
                text.starts_with(pattern)
            }
            (PropertyShape::EndsWith(pattern), PropertyValue::Text(text)) => {
                text.ends_with(pattern)
            }
            (PropertyShape::Contains(pattern), PropertyValue::Text(text)) => {
                text.contains(pattern)
            }
            (PropertyShape::GreaterThan(bound), PropertyValue::Number(number)) => number > bound,
            (PropertyShape::LowerThan(bound), PropertyValue::Number(number)) => number < bound,
            _ => false,
        }
    }
}
