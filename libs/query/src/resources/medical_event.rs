//! Medical events: incidents handled by the school nurse (injuries, fevers, ...).
//!
//! Keys: `keyword`, `status`, `type`, `level` (severity, integer), `childId` /
//! `childIds`, `startDate` / `endDate` (on `dateHappened`).

use super::{
    child_ids, date_range, discrete, insert_eq, insert_in, integer, BuildFilter, STUDENT_ID_FIELD,
};
use crate::dates::DateRange;
use crate::filter::{Condition, Filter};
use crate::keyword::apply_keyword;
use crate::params::{QueryParameters, RawQuery};
use crate::scope::ScopedQuery;

const TEXT_FIELDS: &[&str] = &["description", "note", "solution"];
const DATE_FIELD: &str = "dateHappened";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalEventQuery {
    pub params: QueryParameters,
    pub status: Option<String>,
    pub event_type: Option<String>,
    pub level: Option<i64>,
    pub child_ids: Vec<String>,
    pub date_happened: DateRange,
}

impl MedicalEventQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            status: discrete(raw, "status"),
            event_type: discrete(raw, "type"),
            level: integer(raw, "level"),
            child_ids: child_ids(raw),
            date_happened: date_range(raw),
        }
    }
}

impl BuildFilter for MedicalEventQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        apply_keyword(&mut filter, self.params.keyword(), TEXT_FIELDS);
        insert_eq(&mut filter, "status", self.status.as_deref());
        insert_eq(&mut filter, "type", self.event_type.as_deref());
        if let Some(level) = self.level {
            filter.insert("level", Condition::eq(level));
        }
        insert_in(&mut filter, STUDENT_ID_FIELD, &self.child_ids);
        filter.insert_range(DATE_FIELD, self.date_happened);
        filter
    }
}

impl ScopedQuery for MedicalEventQuery {
    fn owner_field(&self) -> &'static str {
        STUDENT_ID_FIELD
    }

    fn requested_owner_ids(&self) -> &[String] {
        &self.child_ids
    }
}
