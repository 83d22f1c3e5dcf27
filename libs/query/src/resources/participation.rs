//! Campaign participation: one student's enrolment in one campaign, with the
//! parent's consent and the vaccination outcome.

use super::{
    child_ids, date_range, discrete, insert_eq, insert_in, BuildFilter, STUDENT_ID_FIELD,
};
use crate::dates::DateRange;
use crate::filter::Filter;
use crate::keyword::{keyword_filter, KeywordMatch, Lookup};
use crate::page::PageRequest;
use crate::params::{QueryParameters, RawQuery};
use crate::scope::ScopedQuery;

const KEYWORD_PATHS: &[&str] = &[
    "student.fullName",
    "student.studentCode",
    "note",
    "parentNote",
    "campaign.title",
];

const LOOKUPS: &[Lookup] = &[
    Lookup {
        from: "students",
        local_field: STUDENT_ID_FIELD,
        foreign_field: "_id",
        as_field: "student",
    },
    Lookup {
        from: "campaigns",
        local_field: "campaignId",
        foreign_field: "_id",
        as_field: "campaign",
    },
];

const DATE_FIELD: &str = "participationDate";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationQuery {
    pub params: QueryParameters,
    pub campaign_id: Option<String>,
    pub parent_consent: Option<String>,
    pub vaccination_status: Option<String>,
    pub child_ids: Vec<String>,
    pub participation_date: DateRange,
}

impl ParticipationQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            campaign_id: discrete(raw, "campaignId"),
            parent_consent: discrete(raw, "parentConsent"),
            vaccination_status: discrete(raw, "vaccinationStatus"),
            child_ids: child_ids(raw),
            participation_date: date_range(raw),
        }
    }
}

impl BuildFilter for ParticipationQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        insert_eq(&mut filter, "campaignId", self.campaign_id.as_deref());
        insert_eq(&mut filter, "parentConsent", self.parent_consent.as_deref());
        insert_eq(
            &mut filter,
            "vaccinationStatus",
            self.vaccination_status.as_deref(),
        );
        insert_in(&mut filter, STUDENT_ID_FIELD, &self.child_ids);
        filter.insert_range(DATE_FIELD, self.participation_date);
        filter
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(&self.params, self.build_filter())
            .with_keyword_match(self.lookups(), self.build_keyword_match())
    }
}

impl KeywordMatch for ParticipationQuery {
    fn lookups(&self) -> &'static [Lookup] {
        LOOKUPS
    }

    fn build_keyword_match(&self) -> Filter {
        keyword_filter(self.params.keyword(), KEYWORD_PATHS)
    }
}

impl ScopedQuery for ParticipationQuery {
    fn owner_field(&self) -> &'static str {
        STUDENT_ID_FIELD
    }

    fn requested_owner_ids(&self) -> &[String] {
        &self.child_ids
    }
}
