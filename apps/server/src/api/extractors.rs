//! Custom Axum extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use schoolcare_query::{Caller, Role};
use std::convert::Infallible;

use crate::state::AppState;

/// Caller identity from the headers named in `identity` config.
///
/// Both headers must be present and non-blank, otherwise the identity is
/// `None` and scoped listings are rejected downstream.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<Caller>);

#[async_trait]
impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = &state.config.identity;
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let caller = match (header(&identity.role_header), header(&identity.id_header)) {
            (Some(role), Some(id)) => Some(Caller::new(Role::parse(role), id)),
            _ => None,
        };
        Ok(Self(caller))
    }
}
