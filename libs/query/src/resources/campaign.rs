//! Vaccination and health-check campaigns.
//!
//! The keyword is not applied to the base filter: it goes to the keyword match,
//! which also covers the creator's name and email after the `users` lookup.

use super::{date_range, discrete, insert_eq, BuildFilter};
use crate::dates::DateRange;
use crate::filter::Filter;
use crate::keyword::{keyword_filter, KeywordMatch, Lookup};
use crate::page::PageRequest;
use crate::params::{QueryParameters, RawQuery};

const KEYWORD_PATHS: &[&str] = &[
    "title",
    "description",
    "createdBy.fullName",
    "createdBy.email",
];

const LOOKUPS: &[Lookup] = &[Lookup {
    from: "users",
    local_field: "createdBy",
    foreign_field: "_id",
    as_field: "createdBy",
}];

const DATE_FIELD: &str = "startDate";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignQuery {
    pub params: QueryParameters,
    pub status: Option<String>,
    pub campaign_type: Option<String>,
    pub start_date: DateRange,
}

impl CampaignQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            status: discrete(raw, "status"),
            campaign_type: discrete(raw, "type"),
            start_date: date_range(raw),
        }
    }
}

impl BuildFilter for CampaignQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        insert_eq(&mut filter, "status", self.status.as_deref());
        insert_eq(&mut filter, "type", self.campaign_type.as_deref());
        filter.insert_range(DATE_FIELD, self.start_date);
        filter
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(&self.params, self.build_filter())
            .with_keyword_match(self.lookups(), self.build_keyword_match())
    }
}

impl KeywordMatch for CampaignQuery {
    fn lookups(&self) -> &'static [Lookup] {
        LOOKUPS
    }

    fn build_keyword_match(&self) -> Filter {
        keyword_filter(self.params.keyword(), KEYWORD_PATHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyword_stays_out_of_base_filter() {
        let query = CampaignQuery::from_raw(&RawQuery::from_pairs([
            ("keyword", "measles"),
            ("status", "ongoing"),
        ]));
        assert_eq!(query.build_filter().to_json(), json!({"status": "ongoing"}));
        assert_eq!(query.build_keyword_match().any_of().len(), 4);
    }

    #[test]
    fn keyword_match_reaches_joined_creator() {
        let query = CampaignQuery::from_raw(&RawQuery::from_pairs([("keyword", "tran")]));
        let joined = json!({
            "title": "Flu shots",
            "createdBy": [{"fullName": "Tran Van Minh", "email": "minh@school.edu"}]
        });
        assert!(query.build_keyword_match().matches(&joined));
    }

    #[test]
    fn no_keyword_means_empty_match() {
        let query = CampaignQuery::from_raw(&RawQuery::new());
        assert!(query.build_keyword_match().is_empty());
        let request = query.page_request();
        assert_eq!(request.keyword_match, Some(Filter::new()));
        assert_eq!(request.lookups, LOOKUPS.to_vec());
    }

    #[test]
    fn start_date_range() {
        let query = CampaignQuery::from_raw(&RawQuery::from_pairs([
            ("startDate", "2024-09-01"),
            ("endDate", "2024-12-31"),
        ]));
        assert_eq!(
            query.build_filter().to_json(),
            json!({"startDate": {
                "$gte": "2024-09-01T00:00:00.000Z",
                "$lte": "2024-12-31T00:00:00.000Z"
            }})
        );
    }
}
