//! Fixed-width symbolic feature sequence.

use crate::core::error::DomainError;
use crate::text::token::Token;
use std::fmt;

/// Number of positions every feature sequence has after padding.
pub const FEATURE_WIDTH: usize = 8;

/// Output of the feature pipeline: exactly [`FEATURE_WIDTH`] tokens, starting
/// with a START or ANY sentinel and ending in a terminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureSequence {
    tokens: Vec<Token>,
}

impl FeatureSequence {
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, DomainError> {
        if tokens.len() != FEATURE_WIDTH {
            return Err(DomainError::FeatureWidth {
                expected: FEATURE_WIDTH,
                actual: tokens.len(),
            });
        }
        Ok(Self { tokens })
    }

    /// Rendered symbols, one nominal attribute value per position.
    pub fn symbols(&self) -> Vec<String> {
        self.tokens.iter().map(Token::render).collect()
    }

    pub fn last(&self) -> &Token {
        &self.tokens[FEATURE_WIDTH - 1]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for FeatureSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols().join(" "))
    }
}
