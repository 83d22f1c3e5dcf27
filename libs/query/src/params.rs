//! Query parameter normalization
//!
//! Converts the raw query string into typed pagination, sort and keyword values.
//! Normalization never fails: pagination and sort are refinements, so malformed
//! or missing input falls back to the defaults below instead of producing a
//! validation error.
//!
//! Recognized keys:
//! - `page`: 1-based page number (default 1)
//! - `paging` (alias `pageSize`): page size (default 10)
//! - `sort`: `field:direction`, e.g. `createdAt:asc` (default `createdAt` descending)
//! - `keyword`: free-text search, trimmed; blank means "no keyword"

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

use crate::escape::{split_unescaped, unescape_list_value};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Untrusted query parameters as received from the caller.
///
/// Keys map to one or more raw string values. The bracket array convention
/// (`childIds[]=a`) is folded into the bare key (`childIds`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    params: HashMap<String, Vec<String>>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered `(key, value)` pairs as decoded by the HTTP layer.
    pub fn from_items(items: &[(String, String)]) -> Self {
        let mut raw = Self::new();
        for (key, value) in items {
            raw.insert(key, value);
        }
        raw
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::new();
        for (key, value) in pairs {
            raw.insert(key.as_ref(), value);
        }
        raw
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.params
            .entry(canonical_key(key).to_string())
            .or_default()
            .push(value.into());
    }

    /// First raw value for `key`, untrimmed.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `key`: comma-separated occurrences are split, entries are
    /// trimmed and blanks dropped.
    pub fn values(&self, key: &str) -> Vec<String> {
        let Some(occurrences) = self.params.get(key) else {
            return Vec::new();
        };

        occurrences
            .iter()
            .flat_map(|occurrence| split_unescaped(occurrence, ','))
            .map(|entry| unescape_list_value(entry.trim()))
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn canonical_key(key: &str) -> &str {
    let key = key.trim();
    key.strip_suffix("[]").unwrap_or(key)
}

impl<'de> Deserialize<'de> for RawQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawQueryVisitor)
    }
}

struct RawQueryVisitor;

impl<'de> Visitor<'de> for RawQueryVisitor {
    type Value = RawQuery;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of query parameters or a sequence of (key, value) pairs")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut raw = RawQuery::new();
        while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
            push_json_value(&mut raw, &key, value);
        }
        Ok(raw)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut raw = RawQuery::new();
        while let Some((key, value)) = seq.next_element::<(String, JsonValue)>()? {
            push_json_value(&mut raw, &key, value);
        }
        Ok(raw)
    }
}

// Scalars are stringified so `{"page": 2}` and `page=2` normalize the same way.
fn push_json_value(raw: &mut RawQuery, key: &str, value: JsonValue) {
    match value {
        JsonValue::String(s) => raw.insert(key, s),
        JsonValue::Number(n) => raw.insert(key, n.to_string()),
        JsonValue::Bool(b) => raw.insert(key, b.to_string()),
        JsonValue::Array(items) => {
            for item in items {
                push_json_value(raw, key, item);
            }
        }
        JsonValue::Null | JsonValue::Object(_) => {}
    }
}

/// Sort direction for the single supported sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Mongo-style direction value (`1` / `-1`).
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// Sort specification, serialized as `{ "<field>": 1 | -1 }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, SortDirection::Descending)
    }
}

impl Serialize for Sort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.direction.as_i8())?;
        map.end()
    }
}

/// Normalized pagination, sort and keyword values.
///
/// Invariants: `page >= 1`, `page_size >= 1`, `keyword` is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    pub page: u32,
    pub page_size: u32,
    pub sort: Sort,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
            keyword: None,
        }
    }
}

impl QueryParameters {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            page: parse_page(raw.first("page")),
            page_size: parse_page_size(raw.first("paging").or_else(|| raw.first("pageSize"))),
            sort: parse_sort(raw.first("sort")),
            keyword: parse_keyword(raw.first("keyword")),
        }
    }

    /// Number of records to skip: `(page - 1) * page_size`.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

pub fn parse_page(value: Option<&str>) -> u32 {
    parse_positive(value).unwrap_or(DEFAULT_PAGE)
}

pub fn parse_page_size(value: Option<&str>) -> u32 {
    parse_positive(value).unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Parse `field:direction`. Only `asc` sorts ascending; a missing or unknown
/// direction sorts descending. A blank field yields the default sort.
pub fn parse_sort(value: Option<&str>) -> Sort {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Sort::default();
    };

    let (field, direction) = match value.split_once(':') {
        Some((field, direction)) => (field.trim(), direction.trim()),
        None => (value, ""),
    };

    if field.is_empty() {
        return Sort::default();
    }

    let direction = if direction.eq_ignore_ascii_case("asc") {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    Sort::new(field, direction)
}

pub fn parse_keyword(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
}
