//! End-to-end query normalization scenarios: raw query in, page request out.

use schoolcare_query::{
    BuildFilter, CampaignQuery, EntityQuery, MedicalEventQuery, QueryParameters, RawQuery, Sort,
    SortDirection,
};
use serde_json::json;

#[test]
fn empty_query_uses_defaults_and_matches_everything() {
    let raw = RawQuery::new();
    let params = QueryParameters::from_raw(&raw);

    assert_eq!(params.page, 1);
    assert_eq!(params.page_size, 10);
    assert_eq!(params.sort, Sort::new("createdAt", SortDirection::Descending));
    assert_eq!(params.keyword, None);
    assert_eq!(EntityQuery::from_raw(&raw).build_filter().to_json(), json!({}));
}

#[test]
fn medical_event_keyword_and_status() {
    let raw = RawQuery::from_pairs([("keyword", "flu"), ("status", "approved")]);
    let request = MedicalEventQuery::from_raw(&raw).page_request();

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["filter"]["status"], json!("approved"));
    assert_eq!(value["filter"]["$or"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["skip"], json!(0));
    assert_eq!(value["limit"], json!(10));
    assert_eq!(value["sort"], json!({"createdAt": -1}));
    assert!(value.get("keywordMatch").is_none());
}

#[test]
fn invalid_end_date_leaves_lower_bound_only() {
    let raw = RawQuery::from_pairs([("startDate", "2024-01-01"), ("endDate", "not-a-date")]);
    assert_eq!(
        MedicalEventQuery::from_raw(&raw).build_filter().to_json(),
        json!({"dateHappened": {"$gte": "2024-01-01T00:00:00.000Z"}})
    );
}

#[test]
fn malformed_paging_never_errors() {
    let raw = RawQuery::from_pairs([
        ("page", "-1"),
        ("paging", "ten"),
        ("sort", "name:up"),
        ("keyword", "   "),
    ]);
    let request = CampaignQuery::from_raw(&raw).page_request();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "page": 1,
            "skip": 0,
            "limit": 10,
            "sort": {"name": -1},
            "filter": {},
            "lookups": [{"from": "users", "localField": "createdBy", "foreignField": "_id", "as": "createdBy"}],
            "keywordMatch": {}
        })
    );
}
