//! Error types for the query layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The owned-entity lookup failed. Callers must surface this instead of
    /// falling back to an unscoped filter.
    #[error("Scope resolution failed for caller {caller_id}: {message}")]
    ScopeResolution { caller_id: String, message: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
