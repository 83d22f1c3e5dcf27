//! Business logic layer

pub mod listing;

pub use listing::{ListingService, Resource};
