//! Whole-text topic classifier.

use crate::models::{ModelLoadError, NaiveBayesTextModel};
use companion_application::{ClassifierError, PhraseClassifier};
use companion_domain::{ClassifierInput, InputKind, LabelDistribution};

/// Scores the raw sentence text with a naive Bayes model.
///
/// Registered labels are paired with the model's classes by position.
#[derive(Debug)]
pub struct TopicClassifier {
    name: String,
    labels: Vec<String>,
    model: NaiveBayesTextModel,
}

impl TopicClassifier {
    pub fn new(
        name: impl Into<String>,
        labels: Vec<String>,
        model: NaiveBayesTextModel,
    ) -> Result<Self, ModelLoadError> {
        if labels.len() != model.labels().len() {
            return Err(ModelLoadError::Cardinality {
                what: "topic label".to_string(),
                expected: labels.len(),
                actual: model.labels().len(),
            });
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ModelLoadError::Schema(format!(
                    "duplicate topic label '{label}'"
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            labels,
            model,
        })
    }
}

impl PhraseClassifier for TopicClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_kind(&self) -> InputKind {
        InputKind::RawText
    }

    fn classify(&self, input: &ClassifierInput) -> Result<LabelDistribution, ClassifierError> {
        match input {
            ClassifierInput::RawText(text) => Ok(self.model.distribution(&self.labels, text)?),
            other => Err(ClassifierError::UnsupportedInput {
                expected: "raw_text",
                actual: other.kind_name(),
            }),
        }
    }
}
