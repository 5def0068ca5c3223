//! Dispatcher configuration.

use std::time::Duration;

/// Inbound address the dispatcher serves.
pub const DEFAULT_ADDRESS: &str = "classification.BASIC";
/// Field holding the upstream analyzed text.
pub const DEFAULT_NLP_KEY: &str = "nlp";
/// Field receiving the classification result.
pub const DEFAULT_CLASSIFICATION_KEY: &str = "classification";

/// Shared-store field names read and written per request. Owned by the
/// classification use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub nlp: String,
    pub classification: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            nlp: DEFAULT_NLP_KEY.to_string(),
            classification: DEFAULT_CLASSIFICATION_KEY.to_string(),
        }
    }
}

/// Controls how the dispatcher takes in and runs requests.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Name of the inbound address, used for logging.
    pub address: String,
    /// Upper bound of requests processed at the same time.
    pub max_concurrent_requests: usize,
    /// Capacity of the inbound request channel.
    pub channel_capacity: usize,
    /// How long a caller waits for a reply before giving up.
    pub reply_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            max_concurrent_requests: 16,
            channel_capacity: 64,
            reply_timeout: Duration::from_secs(30),
        }
    }
}

impl DispatchConfig {
    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit.max(1);
        self
    }
}
