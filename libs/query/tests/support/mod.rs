//! Test doubles for the scope lookup.

use async_trait::async_trait;
use schoolcare_query::{Error, Result, ScopeResolver};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolver backed by a fixed parent → children table that counts lookups.
#[derive(Default)]
pub struct StaticResolver {
    children: HashMap<String, Vec<String>>,
    calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, parent_id: &str, child_ids: &[&str]) -> Self {
        self.children.insert(
            parent_id.to_string(),
            child_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScopeResolver for StaticResolver {
    async fn owned_ids(&self, caller_id: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.children.get(caller_id).cloned().unwrap_or_default())
    }
}

/// Resolver whose lookup always fails.
pub struct FailingResolver;

#[async_trait]
impl ScopeResolver for FailingResolver {
    async fn owned_ids(&self, caller_id: &str) -> Result<Vec<String>> {
        Err(Error::ScopeResolution {
            caller_id: caller_id.to_string(),
            message: "students collection unavailable".to_string(),
        })
    }
}
