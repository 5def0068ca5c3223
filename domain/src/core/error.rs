//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Upstream data broke the sentence contract (caller bug, never defaulted).
    #[error("Input contract violation: {0}")]
    InputContract(String),

    /// The pipeline produced a sequence of the wrong width.
    #[error("Feature sequence must have {expected} tokens, got {actual}")]
    FeatureWidth { expected: usize, actual: usize },

    /// A feature value outside the attribute's legal domain.
    #[error("Value '{value}' is not legal for attribute '{attribute}'")]
    SchemaViolation { attribute: String, value: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),
}

impl DomainError {
    pub fn input_contract(message: impl Into<String>) -> Self {
        DomainError::InputContract(message.into())
    }

    /// Check if this error was caused by malformed upstream input
    pub fn is_input_contract(&self) -> bool {
        matches!(self, DomainError::InputContract(_))
    }
}
