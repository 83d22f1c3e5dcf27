//! Owner scoping
//!
//! A parent may only see records that belong to their own children. Scoped
//! resources build their plain filter first, then (for parents only) replace
//! the owner constraint with the caller's scope set:
//!
//! - explicit owner ids in the query are intersected with the scope set, so a
//!   caller can never widen their own access;
//! - without explicit ids the whole scope set is used;
//! - an empty scope set still produces `{"$in": []}`, which matches nothing.
//!
//! Resolution failures propagate. Falling back to "no constraint" would leak
//! other families' records.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::fmt;

use crate::filter::{Condition, Filter};
use crate::resources::BuildFilter;
use crate::Result;

/// Caller role as supplied by the authentication middleware.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    Nurse,
    Parent,
    Other(String),
}

impl Role {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "manager" => Self::Manager,
            "nurse" => Self::Nurse,
            "parent" => Self::Parent,
            _ => Self::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Nurse => "nurse",
            Self::Parent => "parent",
            Self::Other(role) => role,
        }
    }

    /// Roles whose visibility is narrowed to owned records.
    pub fn is_scoped(&self) -> bool {
        matches!(self, Self::Parent)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub role: Role,
    pub caller_id: String,
}

impl Caller {
    pub fn new(role: Role, caller_id: impl Into<String>) -> Self {
        Self {
            role,
            caller_id: caller_id.into(),
        }
    }
}

/// Resolves the ids of entities a caller owns (for a parent: their children's
/// student ids). Called at most once per request; results are never cached.
#[async_trait]
pub trait ScopeResolver: Send + Sync {
    async fn owned_ids(&self, caller_id: &str) -> Result<Vec<String>>;
}

/// A resource query whose records belong to an owning entity.
pub trait ScopedQuery: BuildFilter {
    /// Field holding the owner id on stored records.
    fn owner_field(&self) -> &'static str;

    /// Owner ids the caller explicitly asked for (empty when not supplied).
    fn requested_owner_ids(&self) -> &[String];
}

/// Build the filter for `query`, narrowed to what `caller` may see.
pub async fn build_scoped_filter<Q, R>(query: &Q, caller: &Caller, resolver: &R) -> Result<Filter>
where
    Q: ScopedQuery + ?Sized,
    R: ScopeResolver + ?Sized,
{
    let mut filter = query.build_filter();
    if !caller.role.is_scoped() {
        return Ok(filter);
    }

    let owned = resolver.owned_ids(&caller.caller_id).await?;
    tracing::debug!(
        caller_id = %caller.caller_id,
        role = %caller.role,
        owned = owned.len(),
        "Resolved caller scope"
    );

    let requested = query.requested_owner_ids();
    let allowed = if requested.is_empty() {
        dedup(&owned)
    } else {
        let narrowed = intersect(requested, &owned);
        if narrowed.len() < dedup(requested).len() {
            tracing::warn!(
                caller_id = %caller.caller_id,
                requested = requested.len(),
                allowed = narrowed.len(),
                "Dropped requested owner ids outside the caller's scope"
            );
        }
        narrowed
    };

    filter.insert(
        query.owner_field(),
        Condition::In(allowed.into_iter().map(JsonValue::String).collect()),
    );
    Ok(filter)
}

/// Async counterpart of [`BuildFilter`] for scoped resources.
#[async_trait]
pub trait BuildScopedFilter: ScopedQuery + Sync {
    async fn build_scoped_filter(
        &self,
        caller: &Caller,
        resolver: &dyn ScopeResolver,
    ) -> Result<Filter> {
        build_scoped_filter(self, caller, resolver).await
    }
}

impl<T> BuildScopedFilter for T where T: ScopedQuery + Sync {}

fn dedup(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Requested ids that are also owned, in request order.
fn intersect(requested: &[String], owned: &[String]) -> Vec<String> {
    let owned: HashSet<&str> = owned.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    requested
        .iter()
        .filter(|id| owned.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}
