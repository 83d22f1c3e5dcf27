//! In-memory document store.
//!
//! Collections are vectors of JSON documents keyed by `_id`. The store serves
//! list pages the way the query layer describes them (filter, lookups,
//! keyword match, sort, count, skip/limit) and resolves a parent's children
//! from the `students` collection.

use async_trait::async_trait;
use schoolcare_query::{Lookup, Page, PageRequest, RecordStore, ScopeResolver, Sort};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

pub const STUDENTS: &str = "students";
const PARENT_FIELD: &str = "parentId";
const ID_FIELD: &str = "_id";

type Collections = HashMap<String, Vec<JsonValue>>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, collection: &str, document: JsonValue) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    pub async fn insert_many(
        &self,
        collection: &str,
        documents: impl IntoIterator<Item = JsonValue>,
    ) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Load `{ "<collection>": [documents...] }`. Returns the number of
    /// documents added.
    pub async fn load_seed_value(&self, seed: JsonValue) -> Result<usize> {
        let JsonValue::Object(entries) = seed else {
            return Err(Error::Seed("seed must be an object of collections".into()));
        };

        let mut loaded = 0;
        for (collection, documents) in entries {
            let JsonValue::Array(documents) = documents else {
                return Err(Error::Seed(format!(
                    "collection '{collection}' must be an array of documents"
                )));
            };
            loaded += documents.len();
            self.insert_many(&collection, documents).await;
        }
        Ok(loaded)
    }

    pub async fn load_seed_file(&self, path: &Path) -> Result<usize> {
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: JsonValue = serde_json::from_str(&raw)
            .map_err(|e| Error::Seed(format!("{}: {e}", path.display())))?;
        let loaded = self.load_seed_value(seed).await?;
        tracing::info!(path = %path.display(), documents = loaded, "Seed data loaded");
        Ok(loaded)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_page(
        &self,
        collection: &str,
        request: &PageRequest,
    ) -> schoolcare_query::Result<Page<JsonValue>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Page::empty(request.page, request.limit));
        };

        let mut matched: Vec<JsonValue> = documents
            .iter()
            .filter(|document| request.filter.matches(document))
            .cloned()
            .collect();

        for lookup in &request.lookups {
            for document in &mut matched {
                apply_lookup(document, lookup, &collections);
            }
        }

        if let Some(keyword_match) = &request.keyword_match {
            matched.retain(|document| keyword_match.matches(document));
        }

        sort_documents(&mut matched, &request.sort);

        let total = matched.len() as u64;
        let skip = usize::try_from(request.skip).unwrap_or(usize::MAX);
        let records = matched
            .into_iter()
            .skip(skip)
            .take(request.limit as usize)
            .collect();

        tracing::debug!(collection, total, page = request.page, "Page served");
        Ok(Page::new(records, total, request.page, request.limit))
    }
}

#[async_trait]
impl ScopeResolver for MemoryStore {
    async fn owned_ids(&self, caller_id: &str) -> schoolcare_query::Result<Vec<String>> {
        let collections = self.collections.read().await;
        let ids = collections
            .get(STUDENTS)
            .into_iter()
            .flatten()
            .filter(|student| {
                student.get(PARENT_FIELD).and_then(JsonValue::as_str) == Some(caller_id)
            })
            .filter_map(|student| student.get(ID_FIELD).and_then(JsonValue::as_str))
            .map(str::to_string)
            .collect();
        Ok(ids)
    }
}

/// Replace `as_field` with the array of foreign documents whose
/// `foreign_field` equals the local value (or any element of it).
fn apply_lookup(document: &mut JsonValue, lookup: &Lookup, collections: &Collections) {
    let keys: Vec<&JsonValue> = match document.get(lookup.local_field) {
        Some(JsonValue::Array(items)) => items.iter().collect(),
        Some(value) => vec![value],
        None => Vec::new(),
    };

    let joined: Vec<JsonValue> = collections
        .get(lookup.from)
        .into_iter()
        .flatten()
        .filter(|foreign| {
            foreign
                .get(lookup.foreign_field)
                .is_some_and(|value| keys.contains(&value))
        })
        .cloned()
        .collect();

    if let Some(object) = document.as_object_mut() {
        object.insert(lookup.as_field.to_string(), JsonValue::Array(joined));
    }
}

fn sort_documents(documents: &mut [JsonValue], sort: &Sort) {
    documents.sort_by(|a, b| {
        let ordering = compare_fields(field_value(a, &sort.field), field_value(b, &sort.field));
        if sort.direction.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn field_value<'a>(document: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
        .filter(|value| !value.is_null())
}

// Missing values order after present ones when ascending.
fn compare_fields(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn compare_values(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Number(_) => 1,
        JsonValue::String(_) => 2,
        JsonValue::Object(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Bool(_) => 5,
    }
}
