//! SchoolCare Server
//!
//! HTTP host for the SchoolCare query layer:
//! - Paginated listings of users, catalog entities and campaigns
//! - Student-owned collections scoped to the calling parent's children
//! - In-memory document store seeded from a JSON file

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
