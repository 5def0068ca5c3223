//! Classifier model configuration from TOML (`[models]` section)

use companion_domain::config::check_labels;
use companion_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TOPIC_LABELS: [&str; 4] = ["greeting", "farewell", "weather", "other"];

pub const DEFAULT_SENTENCE_LABELS: [&str; 12] = [
    "IMPERATIVE",
    "DECLARATIVE",
    "PEOPLE",
    "LOCATION",
    "OCCASION",
    "REASON",
    "INFORMATION",
    "CHOICE",
    "DESCRIPTION",
    "QUANTITY",
    "FREQUENCY",
    "DISTANCE",
];

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Classifier models from TOML
///
/// # Example
///
/// ```toml
/// [models.topic]
/// path = "models/topic.json"
/// labels = ["greeting", "farewell", "weather", "other"]
///
/// [models.sentence]
/// path = "models/sentence.json"
/// terminator_normalization = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Whole-text topic classifier
    pub topic: FileTopicModelConfig,
    /// Feature-sequence sentence-type classifier
    pub sentence: FileSentenceModelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTopicModelConfig {
    pub enabled: bool,
    /// Result name in the classification output
    pub name: String,
    pub path: Option<PathBuf>,
    /// Registered labels, in the model's class order
    pub labels: Vec<String>,
}

impl Default for FileTopicModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "topic".to_string(),
            path: None,
            labels: to_strings(&DEFAULT_TOPIC_LABELS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSentenceModelConfig {
    pub enabled: bool,
    pub name: String,
    pub path: Option<PathBuf>,
    pub labels: Vec<String>,
    /// Rewrite `?`, `!` and `.` to QM, EM and DT. Must match how the model was trained.
    pub terminator_normalization: bool,
}

impl Default for FileSentenceModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "sentence".to_string(),
            path: None,
            labels: to_strings(&DEFAULT_SENTENCE_LABELS),
            terminator_normalization: true,
        }
    }
}

fn check_path(section: &str, enabled: bool, path: Option<&PathBuf>) -> Option<ConfigIssue> {
    if enabled && path.is_none_or(|p| p.as_os_str().is_empty()) {
        return Some(ConfigIssue::error(
            ConfigIssueCode::MissingModelPath {
                section: section.to_string(),
            },
            format!("{section}.path: a model file is required when the classifier is enabled"),
        ));
    }
    None
}

impl FileModelsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.topic.enabled {
            issues.extend(check_labels("models.topic", &self.topic.labels));
        }
        issues.extend(check_path("models.topic", self.topic.enabled, self.topic.path.as_ref()));

        if self.sentence.enabled {
            issues.extend(check_labels("models.sentence", &self.sentence.labels));
        }
        issues.extend(check_path(
            "models.sentence",
            self.sentence.enabled,
            self.sentence.path.as_ref(),
        ));

        match (self.topic.enabled, self.sentence.enabled) {
            (false, false) => issues.push(ConfigIssue::error(
                ConfigIssueCode::NoClassifiers,
                "models: every classifier is disabled",
            )),
            (true, true) if self.topic.name == self.sentence.name => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateClassifierName {
                        name: self.topic.name.clone(),
                    },
                    format!(
                        "models: topic and sentence classifiers are both named '{}'",
                        self.topic.name
                    ),
                ));
            }
            _ => {}
        }

        issues
    }
}
