//! Persistence Adapters
//!
//! Storage implementations of the repository and store ports.

pub mod in_memory;

pub use in_memory::InMemoryStore;
