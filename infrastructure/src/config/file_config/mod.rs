//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

mod dispatch;
mod logging;
mod models;

pub use dispatch::FileDispatchConfig;
pub use logging::FileLoggingConfig;
pub use models::{
    DEFAULT_SENTENCE_LABELS, DEFAULT_TOPIC_LABELS, FileModelsConfig, FileSentenceModelConfig,
    FileTopicModelConfig,
};

use companion_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Request intake and shared-store fields
    pub dispatch: FileDispatchConfig,
    /// Classifier model resources
    pub models: FileModelsConfig,
    /// Log level and destination
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.dispatch.validate();
        issues.extend(self.models.validate());
        issues
    }

    /// Render as TOML, for `show-config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[dispatch]
address = "classification.TEST"
max_concurrent_requests = 2

[models.topic]
path = "models/topic.json"
labels = ["greeting", "other"]

[models.sentence]
path = "models/sentence.json"
name = "type"

[logging]
level = "debug"
file = "classifier.log"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dispatch.address, "classification.TEST");
        assert_eq!(config.dispatch.max_concurrent_requests, 2);
        assert_eq!(config.dispatch.channel_capacity, 64);
        assert_eq!(config.models.topic.labels, vec!["greeting", "other"]);
        assert_eq!(config.models.sentence.name, "type");
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.dispatch.nlp_key, "nlp");
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
        // no model paths configured
        assert!(config.validate().iter().all(ConfigIssue::is_error));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = FileConfig::default();
        config.models.topic.path = Some("topic.json".into());
        let rendered = config.to_toml().unwrap();
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
