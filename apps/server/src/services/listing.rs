//! Listing service - turns a resource name and query string into one page
//!
//! Orchestrates list operations by:
//! - Normalizing the query string into the resource's query struct
//! - Building the filter (scoped to the caller's children where required)
//! - Handing the page request to the record store

use schoolcare_query::{
    BuildFilter, BuildScopedFilter, CampaignQuery, Caller, EntityQuery, HealthProfileQuery,
    MedicalEventQuery, MedicalRecordQuery, MedicationRequestQuery, Page, ParticipationQuery,
    RawQuery, RecordStore, ScopeResolver, UserQuery,
};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

use crate::{Error, Result};

const CLASS_TEXT_FIELDS: &[&str] = &["name", "gradeLevel"];

/// Collections exposed under `/api/{resource}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Medicines,
    Classes,
    Campaigns,
    HealthProfiles,
    MedicalEvents,
    MedicalRecords,
    MedicationRequests,
    CampaignParticipations,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Users,
        Resource::Medicines,
        Resource::Classes,
        Resource::Campaigns,
        Resource::HealthProfiles,
        Resource::MedicalEvents,
        Resource::MedicalRecords,
        Resource::MedicationRequests,
        Resource::CampaignParticipations,
    ];

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.path_segment() == segment)
    }

    pub fn path_segment(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Medicines => "medicines",
            Resource::Classes => "classes",
            Resource::Campaigns => "campaigns",
            Resource::HealthProfiles => "health-profiles",
            Resource::MedicalEvents => "medical-events",
            Resource::MedicalRecords => "medical-records",
            Resource::MedicationRequests => "medication-requests",
            Resource::CampaignParticipations => "campaign-participations",
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Medicines => "medicines",
            Resource::Classes => "classes",
            Resource::Campaigns => "campaigns",
            Resource::HealthProfiles => "healthProfiles",
            Resource::MedicalEvents => "medicalEvents",
            Resource::MedicalRecords => "medicalRecords",
            Resource::MedicationRequests => "medicationRequests",
            Resource::CampaignParticipations => "campaignParticipations",
        }
    }

    /// Student-owned collections. Listing them needs a caller identity.
    pub fn is_scoped(&self) -> bool {
        matches!(
            self,
            Resource::HealthProfiles
                | Resource::MedicalEvents
                | Resource::MedicalRecords
                | Resource::MedicationRequests
                | Resource::CampaignParticipations
        )
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

pub struct ListingService {
    records: Arc<dyn RecordStore>,
    scopes: Arc<dyn ScopeResolver>,
}

impl ListingService {
    pub fn new(records: Arc<dyn RecordStore>, scopes: Arc<dyn ScopeResolver>) -> Self {
        Self { records, scopes }
    }

    /// List one page of `resource`.
    ///
    /// Scoped resources require `caller`; parents only ever see records of
    /// their own children.
    pub async fn list(
        &self,
        resource: Resource,
        query_items: &[(String, String)],
        caller: Option<&Caller>,
    ) -> Result<Page<JsonValue>> {
        let raw = RawQuery::from_items(query_items);

        match resource {
            Resource::Users => self.list_unscoped(resource, &UserQuery::from_raw(&raw)).await,
            Resource::Medicines => {
                self.list_unscoped(resource, &EntityQuery::from_raw(&raw))
                    .await
            }
            Resource::Classes => {
                let query = EntityQuery::with_text_fields(&raw, CLASS_TEXT_FIELDS);
                self.list_unscoped(resource, &query).await
            }
            Resource::Campaigns => {
                self.list_unscoped(resource, &CampaignQuery::from_raw(&raw))
                    .await
            }
            Resource::HealthProfiles => {
                self.list_scoped(resource, &HealthProfileQuery::from_raw(&raw), caller)
                    .await
            }
            Resource::MedicalEvents => {
                self.list_scoped(resource, &MedicalEventQuery::from_raw(&raw), caller)
                    .await
            }
            Resource::MedicalRecords => {
                self.list_scoped(resource, &MedicalRecordQuery::from_raw(&raw), caller)
                    .await
            }
            Resource::MedicationRequests => {
                self.list_scoped(resource, &MedicationRequestQuery::from_raw(&raw), caller)
                    .await
            }
            Resource::CampaignParticipations => {
                self.list_scoped(resource, &ParticipationQuery::from_raw(&raw), caller)
                    .await
            }
        }
    }

    async fn list_unscoped<Q: BuildFilter + Sync>(
        &self,
        resource: Resource,
        query: &Q,
    ) -> Result<Page<JsonValue>> {
        let request = query.page_request();
        Ok(self.records.find_page(resource.collection(), &request).await?)
    }

    async fn list_scoped<Q: BuildScopedFilter>(
        &self,
        resource: Resource,
        query: &Q,
        caller: Option<&Caller>,
    ) -> Result<Page<JsonValue>> {
        let caller = caller.ok_or_else(|| {
            Error::Unauthorized(format!("listing {resource} requires caller identity"))
        })?;

        // Keep lookups and keyword match, swap in the scoped filter.
        let mut request = query.page_request();
        request.filter = query
            .build_scoped_filter(caller, self.scopes.as_ref())
            .await?;

        tracing::debug!(
            resource = %resource,
            role = %caller.role,
            filter = %request.filter.to_json(),
            "Listing scoped resource"
        );
        Ok(self.records.find_page(resource.collection(), &request).await?)
    }
}
