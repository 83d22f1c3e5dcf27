//! HTTP request handlers

pub mod list;

pub use list::list_resource;
