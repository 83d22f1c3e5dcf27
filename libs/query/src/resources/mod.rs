//! Per-resource filter builders
//!
//! Every resource has one input struct naming each query key it recognizes,
//! built with `from_raw`, and a [`BuildFilter`] implementation. Builders share
//! the parameter normalizer but nothing else: each owns its field names, so
//! two resources filtering on `startDate`/`endDate` never collide.
//!
//! Conventions:
//! - discrete values constrain only when non-blank
//! - list values (`childIds`, `status`) become `$in` constraints
//! - date ranges carry only the bounds that parsed
//! - numeric fields are coerced before being compared

mod campaign;
mod entity;
mod health_profile;
mod medical_event;
mod medical_record;
mod medication_request;
mod participation;
mod user;

pub use campaign::CampaignQuery;
pub use entity::EntityQuery;
pub use health_profile::HealthProfileQuery;
pub use medical_event::MedicalEventQuery;
pub use medical_record::MedicalRecordQuery;
pub use medication_request::MedicationRequestQuery;
pub use participation::ParticipationQuery;
pub use user::UserQuery;

use crate::dates::DateRange;
use crate::filter::{Condition, Filter};
use crate::page::PageRequest;
use crate::params::{QueryParameters, RawQuery};

/// Owner key on stored records for child-owned resources.
pub const STUDENT_ID_FIELD: &str = "studentId";

/// Synchronous filter construction.
pub trait BuildFilter {
    fn params(&self) -> &QueryParameters;

    fn build_filter(&self) -> Filter;

    /// Page request for an unscoped listing.
    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.params(), self.build_filter())
    }
}

/// Trimmed, non-blank value of `key`.
pub(crate) fn discrete(raw: &RawQuery, key: &str) -> Option<String> {
    raw.first(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Integer value of `key`. Non-numeric input is dropped rather than compared
/// as a string, which would never match a numeric field.
pub(crate) fn integer(raw: &RawQuery, key: &str) -> Option<i64> {
    let value = discrete(raw, key)?;
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::debug!(key, value = %value, "Ignoring non-numeric filter value");
            None
        }
    }
}

/// Owner ids from `childIds` and `childId`, deduplicated in request order.
pub(crate) fn child_ids(raw: &RawQuery) -> Vec<String> {
    let mut ids = raw.values("childIds");
    ids.extend(raw.values("childId"));
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
    ids
}

pub(crate) fn date_range(raw: &RawQuery) -> DateRange {
    DateRange::parse(raw.first("startDate"), raw.first("endDate"))
}

pub(crate) fn insert_eq(filter: &mut Filter, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        filter.insert(field, Condition::eq(value));
    }
}

pub(crate) fn insert_in(filter: &mut Filter, field: &str, values: &[String]) {
    if !values.is_empty() {
        filter.insert(field, Condition::one_of(values.iter().map(String::as_str)));
    }
}
