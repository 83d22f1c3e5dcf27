//! Resource listing routes

use crate::api::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn list_routes() -> Router<AppState> {
    Router::new().route("/:resource", get(handlers::list_resource))
}
