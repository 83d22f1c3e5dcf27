//! Storage backends for list queries

pub mod memory;

pub use memory::MemoryStore;
