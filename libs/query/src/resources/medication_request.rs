//! Medication requests: parents asking the nurse to administer medicine.
//!
//! `status` accepts several values (`status=pending&status=approved` or
//! `status=pending,approved`) and matches any of them.

use super::{child_ids, date_range, insert_in, BuildFilter, STUDENT_ID_FIELD};
use crate::dates::DateRange;
use crate::filter::Filter;
use crate::keyword::apply_keyword;
use crate::params::{QueryParameters, RawQuery};
use crate::scope::ScopedQuery;

const TEXT_FIELDS: &[&str] = &["medicineName", "reason", "note"];
const DATE_FIELD: &str = "requestDate";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationRequestQuery {
    pub params: QueryParameters,
    pub statuses: Vec<String>,
    pub child_ids: Vec<String>,
    pub request_date: DateRange,
}

impl MedicationRequestQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            statuses: raw.values("status"),
            child_ids: child_ids(raw),
            request_date: date_range(raw),
        }
    }
}

impl BuildFilter for MedicationRequestQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        apply_keyword(&mut filter, self.params.keyword(), TEXT_FIELDS);
        insert_in(&mut filter, "status", &self.statuses);
        insert_in(&mut filter, STUDENT_ID_FIELD, &self.child_ids);
        filter.insert_range(DATE_FIELD, self.request_date);
        filter
    }
}

impl ScopedQuery for MedicationRequestQuery {
    fn owner_field(&self) -> &'static str {
        STUDENT_ID_FIELD
    }

    fn requested_owner_ids(&self) -> &[String] {
        &self.child_ids
    }
}
