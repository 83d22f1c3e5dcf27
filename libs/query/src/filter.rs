//! Filter predicates
//!
//! A [`Filter`] is plain data describing which stored records qualify: a
//! conjunction of per-field [`Condition`]s plus an optional disjunction of
//! sub-filters. It serializes to the Mongo query shape the persistence layer
//! consumes:
//!
//! ```json
//! { "$or": [{ "note": { "$regex": "flu", "$options": "i" } }],
//!   "status": "approved",
//!   "studentId": { "$in": ["s1", "s2"] },
//!   "dateHappened": { "$gte": "2024-01-01T00:00:00.000Z" } }
//! ```
//!
//! [`Filter::matches`] evaluates the same predicate against a JSON document
//! for stores that execute filters in memory.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::dates::{parse_date, DateRange};

/// Constraint on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the scalar.
    Eq(JsonValue),
    /// Field is one of the values. An empty list matches nothing.
    In(Vec<JsonValue>),
    /// Case-insensitive substring match on a string field.
    Contains(String),
    /// Timestamp within the range (inclusive bounds).
    Range(DateRange),
}

impl Condition {
    pub fn eq(value: impl Into<JsonValue>) -> Self {
        Self::Eq(value.into())
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        Self::In(values.into_iter().map(Into::into).collect())
    }

    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    /// Whether any of the values found at the field path satisfies the condition.
    fn matches(&self, values: &[&JsonValue]) -> bool {
        match self {
            Self::Eq(expected) => values.iter().any(|v| scalar_eq(v, expected)),
            Self::In(allowed) => values
                .iter()
                .any(|v| allowed.iter().any(|expected| scalar_eq(v, expected))),
            Self::Contains(text) => {
                let needle = text.to_lowercase();
                values
                    .iter()
                    .filter_map(|v| v.as_str())
                    .any(|s| s.to_lowercase().contains(&needle))
            }
            Self::Range(range) => values
                .iter()
                .filter_map(|v| v.as_str())
                .filter_map(parse_date)
                .any(|instant| range.contains(instant)),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Eq(value) => value.serialize(serializer),
            Self::In(values) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$in", values)?;
                map.end()
            }
            Self::Contains(text) => {
                // Keywords are literal text, never patterns.
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("$regex", &regex::escape(text))?;
                map.serialize_entry("$options", "i")?;
                map.end()
            }
            Self::Range(range) => range.serialize(serializer),
        }
    }
}

/// Filter predicate: every field condition must hold and, when present, at
/// least one of the `$or` branches must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: BTreeMap<String, Condition>,
    any_of: Vec<Filter>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field filter.
    pub fn field(field: impl Into<String>, condition: Condition) -> Self {
        let mut filter = Self::new();
        filter.insert(field, condition);
        filter
    }

    /// True when the filter places no constraint at all (matches everything).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.any_of.is_empty()
    }

    /// Set the condition for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, condition: Condition) -> &mut Self {
        self.fields.insert(field.into(), condition);
        self
    }

    /// Add a range condition when at least one bound is present.
    pub fn insert_range(&mut self, field: impl Into<String>, range: DateRange) -> &mut Self {
        if !range.is_empty() {
            self.insert(field, Condition::Range(range));
        }
        self
    }

    /// Replace the `$or` branches. An empty list removes the disjunction.
    pub fn set_any_of(&mut self, branches: Vec<Filter>) -> &mut Self {
        self.any_of = branches;
        self
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn any_of(&self) -> &[Filter] {
        &self.any_of
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_else(|_| JsonValue::Object(Default::default()))
    }

    /// Evaluate against a JSON document.
    ///
    /// Dotted paths walk nested objects; arrays along the way (for example the
    /// output of a lookup stage) fan out, and a field matches when any value
    /// reached satisfies the condition. Missing fields never match.
    pub fn matches(&self, document: &JsonValue) -> bool {
        let fields_match = self
            .fields
            .iter()
            .all(|(path, condition)| condition.matches(&resolve_path(document, path)));

        fields_match && (self.any_of.is_empty() || self.any_of.iter().any(|f| f.matches(document)))
    }
}

impl Serialize for Filter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let len = self.fields.len() + usize::from(!self.any_of.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.any_of.is_empty() {
            map.serialize_entry("$or", &self.any_of)?;
        }
        for (field, condition) in &self.fields {
            map.serialize_entry(field, condition)?;
        }
        map.end()
    }
}

pub(crate) fn resolve_path<'a>(document: &'a JsonValue, path: &str) -> Vec<&'a JsonValue> {
    let mut current = vec![document];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                JsonValue::Object(map) => next.extend(map.get(segment)),
                JsonValue::Array(items) => next.extend(
                    items
                        .iter()
                        .filter_map(|item| item.as_object())
                        .filter_map(|map| map.get(segment)),
                ),
                _ => {}
            }
        }
        current = next;
    }

    let mut out = Vec::with_capacity(current.len());
    for value in current {
        match value {
            JsonValue::Array(items) => out.extend(items.iter()),
            other => out.push(other),
        }
    }
    out
}

fn scalar_eq(actual: &JsonValue, expected: &JsonValue) -> bool {
    match (actual, expected) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}
