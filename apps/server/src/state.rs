//! Shared application state handed to every handler.

use schoolcare_query::{RecordStore, ScopeResolver};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::db::MemoryStore;
use crate::services::ListingService;
use crate::Result;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub listing: Arc<ListingService>,
}

impl AppState {
    /// Build state backed by an in-memory store, seeded from
    /// `store.seed_path` when configured.
    pub async fn new(config: Config) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        if let Some(seed_path) = &config.store.seed_path {
            store.load_seed_file(Path::new(seed_path)).await?;
        }
        Ok(Self::with_backends(config, store.clone(), store))
    }

    pub fn with_backends(
        config: Config,
        records: Arc<dyn RecordStore>,
        scopes: Arc<dyn ScopeResolver>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            listing: Arc::new(ListingService::new(records, scopes)),
        }
    }
}
