pub mod fixtures;

use anyhow::Context as _;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use schoolcare_query::ScopeResolver;
use schoolcare_server::{api::create_router, db::MemoryStore, AppState, Config};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt as _;

pub use fixtures::*;

pub const PARENT_WITH_CHILDREN: &str = "p-lan";
pub const PARENT_WITHOUT_CHILDREN: &str = "p-new";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// App over the standard fixture data set.
    pub async fn new() -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::new());
        store
            .load_seed_value(fixture_seed())
            .await
            .context("load fixtures")?;
        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        schoolcare_server::logging::init_simple_logging();
        let state = AppState::with_backends(Config::default(), store.clone(), store.clone());
        Self {
            router: create_router(state),
            store,
        }
    }

    /// Fixture data for records, the given resolver for scope lookups.
    pub async fn with_resolver(resolver: Arc<dyn ScopeResolver>) -> anyhow::Result<Self> {
        schoolcare_server::logging::init_simple_logging();
        let store = Arc::new(MemoryStore::new());
        store.load_seed_value(fixture_seed()).await?;
        let state = AppState::with_backends(Config::default(), store.clone(), resolver);
        Ok(Self {
            router: create_router(state),
            store,
        })
    }

    pub async fn get(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, JsonValue)> {
        self.get_as(path_and_query, &[]).await
    }

    /// GET with caller identity headers (`x-user-role`, `x-user-id`).
    pub async fn get_as_caller(
        &self,
        path_and_query: &str,
        role: &str,
        caller_id: &str,
    ) -> anyhow::Result<(StatusCode, JsonValue)> {
        self.get_as(
            path_and_query,
            &[("x-user-role", role), ("x-user-id", caller_id)],
        )
        .await
    }

    pub async fn get_as(
        &self,
        path_and_query: &str,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, JsonValue)> {
        let (status, _, body) = self
            .request(Method::GET, path_and_query, extra_headers)
            .await?;
        let json = serde_json::from_slice(&body).context("parse response body")?;
        Ok((status, json))
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("accept", "application/json")
            .body(Body::empty())
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }
}

/// Ids of the records on a page, in order.
pub fn record_ids(page: &JsonValue) -> Vec<String> {
    page["records"]
        .as_array()
        .map(|records| {
            records
                .iter()
                .filter_map(|r| r["_id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolver that always fails, as a students lookup would when its store is down.
pub struct UnavailableResolver;

#[async_trait]
impl ScopeResolver for UnavailableResolver {
    async fn owned_ids(&self, caller_id: &str) -> schoolcare_query::Result<Vec<String>> {
        Err(schoolcare_query::Error::ScopeResolution {
            caller_id: caller_id.to_string(),
            message: "students collection unavailable".to_string(),
        })
    }
}
