//! Configuration validation issues.
//!
//! Config loading lives in the infrastructure layer; the issue types live here
//! so that every layer can report problems in the same shape.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the process must not start.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A classifier has no registered labels.
    EmptyLabels { section: String },
    /// A classifier registers the same label twice.
    DuplicateLabel { section: String, label: String },
    /// A classifier has no model resource path.
    MissingModelPath { section: String },
    /// Two classifiers share a result name.
    DuplicateClassifierName { name: String },
    /// A numeric setting must be positive.
    ZeroValue { field: String },
    /// The input and result fields of a store entry coincide.
    SameStoreKey { key: String },
    /// No classifier is configured at all.
    NoClassifiers,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check a registered label list for emptiness and duplicates.
pub fn check_labels(section: &str, labels: &[String]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if labels.is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyLabels {
                section: section.to_string(),
            },
            format!("{section}.labels: at least one label is required"),
        ));
    }
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateLabel {
                    section: section.to_string(),
                    label: label.clone(),
                },
                format!("{section}.labels: '{label}' is listed more than once"),
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_labels_ok() {
        let labels = vec!["greeting".to_string(), "other".to_string()];
        assert!(check_labels("models.topic", &labels).is_empty());
    }

    #[test]
    fn test_check_labels_empty() {
        let issues = check_labels("models.topic", &[]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyLabels {
                section: "models.topic".to_string()
            }
        );
    }

    #[test]
    fn test_check_labels_duplicate() {
        let labels = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let issues = check_labels("models.sentence", &labels);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'a'"));
    }
}
