//! Contract with the persistence layer: what a list query hands over and what
//! comes back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::filter::Filter;
use crate::keyword::Lookup;
use crate::params::{QueryParameters, Sort};
use crate::Result;

/// Everything the persistence layer needs to serve one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub skip: u64,
    pub limit: u32,
    pub sort: Sort,
    pub filter: Filter,
    /// Joins to run after `filter` and before `keyword_match`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lookups: Vec<Lookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_match: Option<Filter>,
}

impl PageRequest {
    pub fn new(params: &QueryParameters, filter: Filter) -> Self {
        Self {
            page: params.page,
            skip: params.skip(),
            limit: params.limit(),
            sort: params.sort.clone(),
            filter,
            lookups: Vec::new(),
            keyword_match: None,
        }
    }

    pub fn with_keyword_match(mut self, lookups: &[Lookup], keyword_match: Filter) -> Self {
        self.lookups = lookups.to_vec();
        self.keyword_match = Some(keyword_match);
        self
    }
}

/// One page of results plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            records,
            total,
            page,
            total_pages,
            limit,
        }
    }

    pub fn empty(page: u32, limit: u32) -> Self {
        Self::new(Vec::new(), 0, page, limit)
    }
}

/// Storage backend that executes page requests against a named collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_page(&self, collection: &str, request: &PageRequest) -> Result<Page<JsonValue>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawQuery;
    use serde_json::json;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Page::<()>::new(Vec::new(), 21, 1, 10).total_pages, 3);
        assert_eq!(Page::<()>::new(Vec::new(), 20, 1, 10).total_pages, 2);
        assert_eq!(Page::<()>::empty(1, 10).total_pages, 0);
    }

    #[test]
    fn request_serializes_persistence_contract() {
        let params = QueryParameters::from_raw(&RawQuery::from_pairs([
            ("page", "2"),
            ("paging", "5"),
            ("sort", "name:asc"),
        ]));
        let request = PageRequest::new(&params, Filter::new());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"page": 2, "skip": 5, "limit": 5, "sort": {"name": 1}, "filter": {}})
        );
    }
}
