//! Application-level configuration.
//!
//! - [`DispatchConfig`]: request intake, concurrency and shared-store field names

pub mod dispatch_config;

pub use dispatch_config::{DispatchConfig, StoreKeys};
