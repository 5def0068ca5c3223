//! Core domain concepts shared across all subdomains.
//!
//! - [`request::RequestId`]: correlation id of a classification request
//! - [`request::RequestPhase`]: request lifecycle
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod request;
