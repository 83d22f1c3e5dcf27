//! List handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use schoolcare_query::Page;
use serde_json::Value as JsonValue;

use crate::api::extractors::CallerIdentity;
use crate::request_context::RequestContext;
use crate::services::Resource;
use crate::state::AppState;
use crate::{Error, Result};

/// GET /api/{resource}
pub async fn list_resource(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Extension(context): Extension<RequestContext>,
    CallerIdentity(caller): CallerIdentity,
    Query(items): Query<Vec<(String, String)>>,
) -> Result<Json<Page<JsonValue>>> {
    let resource = Resource::from_path_segment(&segment)
        .ok_or_else(|| Error::NotFound(format!("unknown resource '{segment}'")))?;

    tracing::debug!(
        request_id = %context.request_id,
        resource = %resource,
        params = items.len(),
        "Listing resource"
    );

    let page = state
        .listing
        .list(resource, &items, caller.as_ref())
        .await?;
    Ok(Json(page))
}
