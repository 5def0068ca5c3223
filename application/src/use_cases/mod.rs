//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify_request;
pub mod dispatch;

#[cfg(test)]
pub(crate) mod test_support;
