//! Generic catalog entity (medicines, classes, vaccine types, ...).

use super::{discrete, insert_eq, BuildFilter};
use crate::filter::Filter;
use crate::keyword::apply_keyword;
use crate::params::{QueryParameters, RawQuery};

const DEFAULT_TEXT_FIELDS: &[&str] = &["name", "code"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    pub params: QueryParameters,
    pub status: Option<String>,
    pub text_fields: &'static [&'static str],
}

impl Default for EntityQuery {
    fn default() -> Self {
        Self {
            params: QueryParameters::default(),
            status: None,
            text_fields: DEFAULT_TEXT_FIELDS,
        }
    }
}

impl EntityQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self::with_text_fields(raw, DEFAULT_TEXT_FIELDS)
    }

    /// Same as [`EntityQuery::from_raw`] with a collection-specific search field list.
    pub fn with_text_fields(raw: &RawQuery, text_fields: &'static [&'static str]) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            status: discrete(raw, "status"),
            text_fields,
        }
    }
}

impl BuildFilter for EntityQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        apply_keyword(&mut filter, self.params.keyword(), self.text_fields);
        insert_eq(&mut filter, "status", self.status.as_deref());
        filter
    }
}
