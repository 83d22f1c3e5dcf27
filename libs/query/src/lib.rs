//! SchoolCare query layer
//!
//! Translates an untrusted query string into everything the persistence layer
//! needs to serve one page of a list endpoint:
//! - Normalized pagination and sort parameters ([`QueryParameters`])
//! - A Mongo-shaped filter predicate per resource ([`Filter`])
//! - A keyword-match predicate over joined records ([`KeywordMatch`])
//! - Owner scoping for parents, resolved asynchronously ([`BuildScopedFilter`])
//!
//! The HTTP router, the authentication middleware and the storage engine are
//! collaborators: this crate only defines the traits they implement
//! ([`ScopeResolver`], [`RecordStore`]).

pub mod dates;
pub mod error;
mod escape;
pub mod filter;
pub mod keyword;
pub mod page;
pub mod params;
pub mod resources;
pub mod scope;

pub use dates::DateRange;
pub use error::{Error, Result};
pub use filter::{Condition, Filter};
pub use keyword::{KeywordMatch, Lookup};
pub use page::{Page, PageRequest, RecordStore};
pub use params::{QueryParameters, RawQuery, Sort, SortDirection};
pub use resources::{
    BuildFilter, CampaignQuery, EntityQuery, HealthProfileQuery, MedicalEventQuery,
    MedicalRecordQuery, MedicationRequestQuery, ParticipationQuery, UserQuery,
};
pub use scope::{build_scoped_filter, BuildScopedFilter, Caller, Role, ScopeResolver, ScopedQuery};
