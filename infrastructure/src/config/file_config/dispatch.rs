//! Request dispatch configuration from TOML (`[dispatch]` section)

use companion_application::config::dispatch_config::{
    DEFAULT_ADDRESS, DEFAULT_CLASSIFICATION_KEY, DEFAULT_NLP_KEY,
};
use companion_application::{DispatchConfig, StoreKeys};
use companion_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request dispatch configuration from TOML
///
/// # Example
///
/// ```toml
/// [dispatch]
/// address = "classification.BASIC"
/// nlp_key = "nlp"
/// classification_key = "classification"
/// max_concurrent_requests = 16
/// channel_capacity = 64
/// reply_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Inbound address name
    pub address: String,
    /// Store field holding the analyzed text
    pub nlp_key: String,
    /// Store field receiving the result
    pub classification_key: String,
    pub max_concurrent_requests: usize,
    pub channel_capacity: usize,
    /// Caller-side wait for a reply
    pub reply_timeout_secs: u64,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        let defaults = DispatchConfig::default();
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            nlp_key: DEFAULT_NLP_KEY.to_string(),
            classification_key: DEFAULT_CLASSIFICATION_KEY.to_string(),
            max_concurrent_requests: defaults.max_concurrent_requests,
            channel_capacity: defaults.channel_capacity,
            reply_timeout_secs: defaults.reply_timeout.as_secs(),
        }
    }
}

impl FileDispatchConfig {
    pub fn to_dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            address: self.address.clone(),
            max_concurrent_requests: self.max_concurrent_requests.max(1),
            channel_capacity: self.channel_capacity.max(1),
            reply_timeout: Duration::from_secs(self.reply_timeout_secs),
        }
    }

    pub fn store_keys(&self) -> StoreKeys {
        StoreKeys {
            nlp: self.nlp_key.clone(),
            classification: self.classification_key.clone(),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let counts = [
            ("max_concurrent_requests", self.max_concurrent_requests as u64),
            ("channel_capacity", self.channel_capacity as u64),
            ("reply_timeout_secs", self.reply_timeout_secs),
        ];
        for (field, value) in counts {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroValue {
                        field: format!("dispatch.{field}"),
                    },
                    format!("dispatch.{field} must be greater than 0"),
                ));
            }
        }
        if self.nlp_key == self.classification_key {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SameStoreKey {
                    key: self.nlp_key.clone(),
                },
                "dispatch.classification_key equals nlp_key; results overwrite the input",
            ));
        }
        issues
    }
}
