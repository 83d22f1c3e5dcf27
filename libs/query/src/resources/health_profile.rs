//! Student health profiles (blood type, allergies, chronic conditions).

use super::{child_ids, insert_in, BuildFilter, STUDENT_ID_FIELD};
use crate::filter::Filter;
use crate::keyword::apply_keyword;
use crate::params::{QueryParameters, RawQuery};
use crate::scope::ScopedQuery;

const TEXT_FIELDS: &[&str] = &["bloodType", "allergies", "chronicDiseases"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthProfileQuery {
    pub params: QueryParameters,
    pub child_ids: Vec<String>,
}

impl HealthProfileQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            child_ids: child_ids(raw),
        }
    }
}

impl BuildFilter for HealthProfileQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        apply_keyword(&mut filter, self.params.keyword(), TEXT_FIELDS);
        insert_in(&mut filter, STUDENT_ID_FIELD, &self.child_ids);
        filter
    }
}

impl ScopedQuery for HealthProfileQuery {
    fn owner_field(&self) -> &'static str {
        STUDENT_ID_FIELD
    }

    fn requested_owner_ids(&self) -> &[String] {
        &self.child_ids
    }
}
