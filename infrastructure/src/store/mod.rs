//! Shared store adapters.

pub mod memory;

pub use memory::InMemorySharedStore;
