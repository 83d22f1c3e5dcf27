//! Owner scoping for parent callers.
//!
//! Key behaviors:
//! - non-parent callers get the plain filter and trigger no lookup
//! - a parent with no children matches zero records, whatever else is requested
//! - explicit child ids are intersected with the parent's own children
//! - lookup failures propagate instead of widening the result

mod support;

use schoolcare_query::{
    build_scoped_filter, BuildFilter, BuildScopedFilter, Caller, Condition, Error,
    HealthProfileQuery, MedicalEventQuery, MedicationRequestQuery, ParticipationQuery, RawQuery,
    Role,
};
use serde_json::json;
use support::{FailingResolver, StaticResolver};

fn parent(id: &str) -> Caller {
    Caller::new(Role::Parent, id)
}

fn raw(pairs: &[(&str, &str)]) -> RawQuery {
    RawQuery::from_pairs(pairs.iter().copied())
}

#[tokio::test]
async fn staff_callers_are_not_scoped() -> anyhow::Result<()> {
    let resolver = StaticResolver::new();
    let query = HealthProfileQuery::from_raw(&raw(&[("keyword", "asthma")]));

    for role in [Role::Admin, Role::Nurse, Role::Manager] {
        let filter = query
            .build_scoped_filter(&Caller::new(role, "u1"), &resolver)
            .await?;
        assert_eq!(filter, query.build_filter());
    }
    assert_eq!(resolver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn parent_without_children_matches_nothing() -> anyhow::Result<()> {
    let resolver = StaticResolver::new();
    let query = HealthProfileQuery::from_raw(&raw(&[("childIds", "s1,s2"), ("keyword", "O+")]));

    let filter = query.build_scoped_filter(&parent("p-empty"), &resolver).await?;

    assert_eq!(filter.get("studentId"), Some(&Condition::In(Vec::new())));
    assert_eq!(filter.to_json()["studentId"], json!({"$in": []}));
    for doc in [
        json!({"studentId": "s1", "bloodType": "O+"}),
        json!({"studentId": "s2", "bloodType": "O+"}),
        json!({"bloodType": "O+"}),
    ] {
        assert!(!filter.matches(&doc), "unexpected match: {doc}");
    }
    Ok(())
}

#[tokio::test]
async fn parent_without_children_and_without_filters() -> anyhow::Result<()> {
    let resolver = StaticResolver::new();
    let query = MedicalEventQuery::from_raw(&RawQuery::new());

    let filter = query.build_scoped_filter(&parent("p-empty"), &resolver).await?;

    assert_eq!(filter.to_json(), json!({"studentId": {"$in": []}}));
    Ok(())
}

#[tokio::test]
async fn parent_defaults_to_all_own_children() -> anyhow::Result<()> {
    let resolver = StaticResolver::new().with_children("p1", &["A", "B"]);
    let query = MedicalEventQuery::from_raw(&raw(&[("status", "approved")]));

    let filter = query.build_scoped_filter(&parent("p1"), &resolver).await?;

    assert_eq!(
        filter.to_json(),
        json!({"status": "approved", "studentId": {"$in": ["A", "B"]}})
    );
    assert_eq!(resolver.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn explicit_ids_are_intersected_with_scope() -> anyhow::Result<()> {
    let resolver = StaticResolver::new().with_children("p1", &["A", "B"]);
    let query = MedicationRequestQuery::from_raw(&raw(&[("childIds", "A"), ("childIds", "C")]));

    let filter = query.build_scoped_filter(&parent("p1"), &resolver).await?;

    assert_eq!(filter.to_json()["studentId"], json!({"$in": ["A"]}));
    assert!(filter.matches(&json!({"studentId": "A"})));
    assert!(!filter.matches(&json!({"studentId": "B"})));
    assert!(!filter.matches(&json!({"studentId": "C"})));
    Ok(())
}

#[tokio::test]
async fn ids_entirely_outside_scope_match_nothing() -> anyhow::Result<()> {
    let resolver = StaticResolver::new().with_children("p1", &["A"]);
    let query = ParticipationQuery::from_raw(&raw(&[("childId", "Z")]));

    let filter = build_scoped_filter(&query, &parent("p1"), &resolver).await?;

    assert_eq!(filter.to_json()["studentId"], json!({"$in": []}));
    Ok(())
}

#[tokio::test]
async fn resolution_failure_propagates() {
    let query = HealthProfileQuery::from_raw(&RawQuery::new());

    let err = query
        .build_scoped_filter(&parent("p1"), &FailingResolver)
        .await
        .unwrap_err();

    match err {
        Error::ScopeResolution { caller_id, .. } => assert_eq!(caller_id, "p1"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn failing_resolver_is_not_consulted_for_staff() -> anyhow::Result<()> {
    let query = HealthProfileQuery::from_raw(&RawQuery::new());
    let filter = query
        .build_scoped_filter(&Caller::new(Role::Nurse, "n1"), &FailingResolver)
        .await?;
    assert!(filter.is_empty());
    Ok(())
}

#[tokio::test]
async fn scoped_build_is_idempotent() -> anyhow::Result<()> {
    let resolver = StaticResolver::new().with_children("p1", &["A", "B"]);
    let query = MedicalEventQuery::from_raw(&raw(&[("childIds", "B,A,B"), ("level", "1")]));

    let first = query.build_scoped_filter(&parent("p1"), &resolver).await?;
    let second = query.build_scoped_filter(&parent("p1"), &resolver).await?;

    assert_eq!(first, second);
    assert_eq!(first.to_json()["studentId"], json!({"$in": ["B", "A"]}));
    Ok(())
}
