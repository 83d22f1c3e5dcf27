//! Medical records: diagnoses and treatments kept on a student's file.

use super::{
    child_ids, date_range, discrete, insert_eq, insert_in, BuildFilter, STUDENT_ID_FIELD,
};
use crate::dates::DateRange;
use crate::filter::Filter;
use crate::keyword::apply_keyword;
use crate::params::{QueryParameters, RawQuery};
use crate::scope::ScopedQuery;

const TEXT_FIELDS: &[&str] = &["diagnosis", "treatment", "note"];
const DATE_FIELD: &str = "recordDate";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalRecordQuery {
    pub params: QueryParameters,
    pub record_type: Option<String>,
    pub child_ids: Vec<String>,
    pub record_date: DateRange,
}

impl MedicalRecordQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            record_type: discrete(raw, "type"),
            child_ids: child_ids(raw),
            record_date: date_range(raw),
        }
    }
}

impl BuildFilter for MedicalRecordQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        apply_keyword(&mut filter, self.params.keyword(), TEXT_FIELDS);
        insert_eq(&mut filter, "type", self.record_type.as_deref());
        insert_in(&mut filter, STUDENT_ID_FIELD, &self.child_ids);
        filter.insert_range(DATE_FIELD, self.record_date);
        filter
    }
}

impl ScopedQuery for MedicalRecordQuery {
    fn owner_field(&self) -> &'static str {
        STUDENT_ID_FIELD
    }

    fn requested_owner_ids(&self) -> &[String] {
        &self.child_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn range_uses_record_date() {
        let query = MedicalRecordQuery::from_raw(&RawQuery::from_pairs([
            ("startDate", "2023-09-01"),
            ("type", "checkup"),
        ]));
        assert_eq!(
            query.build_filter().to_json(),
            json!({
                "type": "checkup",
                "recordDate": {"$gte": "2023-09-01T00:00:00.000Z"}
            })
        );
    }
}
