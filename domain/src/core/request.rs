//! Request identity and lifecycle.
//!
//! # State Transitions
//!
//! ```text
//! Received ──> AnalyzedTextFetched ──> SentencesClassified ──> ResultPersisted ──> Replied
//!     └──────────────┴────────────────────────┴──> (failed, no reply)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation id of a classification request; also the shared-store entry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle phase of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestPhase {
    Received,
    AnalyzedTextFetched,
    SentencesClassified,
    ResultPersisted,
    Replied,
}

impl RequestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Received => "received",
            RequestPhase::AnalyzedTextFetched => "analyzed_text_fetched",
            RequestPhase::SentencesClassified => "sentences_classified",
            RequestPhase::ResultPersisted => "result_persisted",
            RequestPhase::Replied => "replied",
        }
    }

    /// Next phase on success, `None` once replied.
    pub fn next(&self) -> Option<RequestPhase> {
        match self {
            RequestPhase::Received => Some(RequestPhase::AnalyzedTextFetched),
            RequestPhase::AnalyzedTextFetched => Some(RequestPhase::SentencesClassified),
            RequestPhase::SentencesClassified => Some(RequestPhase::ResultPersisted),
            RequestPhase::ResultPersisted => Some(RequestPhase::Replied),
            RequestPhase::Replied => None,
        }
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
