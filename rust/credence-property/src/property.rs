//! Federation properties: names bound to admission rules.

use crate::{PropertyError, PropertyName, PropertyShape, PropertyValue, Timespan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named, constrained attribute entities may be authorized to claim.
///
/// The admission rule is exactly one of:
///
/// - an explicit set of allowed values,
/// - a [`PropertyShape`] predicate,
/// - allow-any (every value of every kind is admitted).
///
/// A [`Timespan`] gates the rule: outside the window nothing is admitted.
/// Construction goes through [`FederationProperty::builder`], which rejects
/// contradictory declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederationProperty {
    name: PropertyName,
    allowed_values: BTreeSet<PropertyValue>,
    shape: Option<PropertyShape>,
    allow_any: bool,
    timespan: Timespan,
}

impl FederationProperty {
    /// Creates a blank [`FederationPropertyBuilder`] for the given name.
    #[must_use]
    pub fn builder(name: impl Into<PropertyName>) -> FederationPropertyBuilder {
        FederationPropertyBuilder::new(name)
    }

    /// Creates an allow-any property with an unbounded validity window.
    #[must_use]
    pub fn allow_any(name: impl Into<PropertyName>) -> Self {
        Self {
            name: name.into(),
            allowed_values: BTreeSet::new(),
            shape: None,
            allow_any: true,
            timespan: Timespan::unbounded(),
        }
    }

    /// Getter for the property name.
    #[must_use]
    pub fn name(&self) -> &PropertyName {
        &self.name
    }

    /// Getter for the explicit allowed-value set.
    #[must_use]
    pub fn allowed_values(&self) -> &BTreeSet<PropertyValue> {
        &self.allowed_values
    }

    /// Getter for the shape predicate.
    #[must_use]
    pub fn shape(&self) -> Option<&PropertyShape> {
        self.shape.as_ref()
    }

    /// Returns `true` if this property admits any value.
    #[must_use]
    pub const fn is_allow_any(&self) -> bool {
        self.allow_any
    }

    /// Getter for the validity window.
    #[must_use]
    pub const fn timespan(&self) -> &Timespan {
        &self.timespan
    }

    /// Returns `true` if this property's name covers `query` by prefix.
    ///
    /// `query` may be equal-length or longer, so a property on `university`
    /// governs `university.scores.engineering`.
    #[must_use]
    pub fn matches_name(&self, query: &PropertyName) -> bool {
        self.name.is_prefix_of(query)
    }

    /// Returns `true` if `value` is admitted at `now_ms`.
    ///
    /// Evaluation order: the validity window gates everything, then
    /// allow-any accepts, then the shape is tried, then explicit set
    /// membership.
    #[must_use]
    pub fn matches_value(&self, value: &PropertyValue, now_ms: u64) -> bool {
        if !self.timespan.contains(now_ms) {
            return false;
        }
        if self.allow_any {
            return true;
        }
        if let Some(shape) = &self.shape {
            if shape.matches(value) {
                return true;
            }
        }
        self.allowed_values.contains(value)
    }

    /// Conjunction of [`matches_name`](Self::matches_name) and
    /// [`matches_value`](Self::matches_value).
    #[must_use]
    pub fn matches_name_value(&self, name: &PropertyName, value: &PropertyValue, now_ms: u64) -> bool {
        self.matches_name(name) && self.matches_value(value, now_ms)
    }

    /// Closes the validity window at `at_ms`. Irreversible.
    pub fn revoke(&mut self, at_ms: u64) {
        self.timespan.valid_until = Some(at_ms);
    }

    /// Returns `true` if the validity window is open at `now_ms`.
    ///
    /// Ignores the admission rule entirely.
    #[must_use]
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        self.timespan.contains(now_ms)
    }
}

/// Builder for [`FederationProperty`].
#[derive(Debug, Clone)]
pub struct FederationPropertyBuilder {
    name: PropertyName,
    allowed_values: BTreeSet<PropertyValue>,
    shape: Option<PropertyShape>,
    allow_any: bool,
    timespan: Timespan,
}

impl FederationPropertyBuilder {
    /// Creates a builder for the given name.
    #[must_use]
    pub fn new(name: impl Into<PropertyName>) -> Self {
        Self {
            name: name.into(),
            allowed_values: BTreeSet::new(),
            shape: None,
            allow_any: false,
            timespan: Timespan::unbounded(),
        }
    }

    /// Adds one allowed value.
    #[must_use]
    pub fn value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.allowed_values.insert(value.into());
        self
    }

    /// Adds a batch of allowed values.
    #[must_use]
    pub fn values<V: Into<PropertyValue>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.allowed_values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Sets the shape predicate.
    #[must_use]
    pub fn shape(mut self, shape: PropertyShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Marks the property as admitting any value.
    #[must_use]
    pub fn allow_any(mut self) -> Self {
        self.allow_any = true;
        self
    }

    /// Sets the validity window.
    #[must_use]
    pub fn timespan(mut self, timespan: Timespan) -> Self {
        self.timespan = timespan;
        self
    }

    /// Validates the declaration and builds the property.
    ///
    /// # Errors
    ///
    /// - [`PropertyError::InvalidValueCondition`] when allow-any is combined
    ///   with explicit values.
    /// - [`PropertyError::EmptyAllowedValuesWithoutAllowAny`] when no
    ///   admission rule was given at all.
    pub fn try_build(self) -> Result<FederationProperty, PropertyError> {
        if self.allow_any && !self.allowed_values.is_empty() {
            return Err(PropertyError::InvalidValueCondition);
        }
        if !self.allow_any && self.allowed_values.is_empty() && self.shape.is_none() {
            return Err(PropertyError::EmptyAllowedValuesWithoutAllowAny);
        }
        Ok(FederationProperty {
            name: self.name,
            allowed_values: self.allowed_values,
            shape: self.shape,
            allow_any: self.allow_any,
            timespan: self.timespan,
        })
    }
}
