//! Keyword search
//!
//! Two flavors exist:
//! - Plain text search: an `$or` of substring matches over fields stored on the
//!   primary record, folded into the main [`Filter`].
//! - Keyword match: the same shape over fields that only exist after related
//!   records are joined in (a campaign's creator, a participation's student).
//!   It must run after the lookup stage; against the bare collection it would
//!   match nothing useful.

use serde::Serialize;

use crate::filter::{Condition, Filter};

/// A join the persistence layer performs before evaluating a keyword match.
///
/// Mirrors a Mongo `$lookup` stage: records of `from` whose `foreign_field`
/// equals this record's `local_field` are attached under `as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    pub from: &'static str,
    pub local_field: &'static str,
    pub foreign_field: &'static str,
    #[serde(rename = "as")]
    pub as_field: &'static str,
}

/// Resources whose searchable text lives on related records.
pub trait KeywordMatch {
    /// Joins the keyword match relies on, in execution order.
    fn lookups(&self) -> &'static [Lookup];

    /// Predicate over the joined view. Empty when no keyword was supplied.
    fn build_keyword_match(&self) -> Filter;
}

/// One substring branch per field.
pub fn keyword_branches(keyword: &str, fields: &[&str]) -> Vec<Filter> {
    fields
        .iter()
        .map(|field| Filter::field(*field, Condition::contains(keyword)))
        .collect()
}

/// Predicate matching `keyword` in any of `fields`; empty when there is no keyword.
pub fn keyword_filter(keyword: Option<&str>, fields: &[&str]) -> Filter {
    let mut filter = Filter::new();
    apply_keyword(&mut filter, keyword, fields);
    filter
}

pub(crate) fn apply_keyword(filter: &mut Filter, keyword: Option<&str>, fields: &[&str]) {
    if let Some(keyword) = keyword {
        filter.set_any_of(keyword_branches(keyword, fields));
    }
}
