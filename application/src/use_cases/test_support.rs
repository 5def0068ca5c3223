//! Hand-written doubles shared by the use case tests.

use crate::ports::classifier::{ClassifierError, ClassifierSet, PhraseClassifier};
use crate::ports::shared_store::{SharedStore, StoreError};
use async_trait::async_trait;
use companion_domain::{
    AnalyzedText, ClassifierInput, FeaturePipeline, InputKind, LabelDistribution, Sentence,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// In-memory store that counts writes and can be told to reject them.
#[derive(Default)]
pub struct MockStore {
    entries: Mutex<HashMap<(String, String), String>>,
    writes: AtomicUsize,
    fail_writes: bool,
    read_delay: Option<Duration>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub async fn seed(&self, entry: &str, field: &str, value: String) {
        self.entries
            .lock()
            .await
            .insert((entry.to_string(), field.to_string()), value);
    }

    pub async fn read(&self, entry: &str, field: &str) -> Option<String> {
        self.entries
            .lock()
            .await
            .get(&(entry.to_string(), field.to_string()))
            .cloned()
    }

    pub async fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SharedStore for MockStore {
    async fn get(&self, entry: &str, field: &str) -> Result<Option<String>, StoreError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.read(entry, field).await)
    }

    async fn put(&self, entry: &str, field: &str, value: String) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.seed(entry, field, value).await;
        Ok(())
    }
}

/// Raw-text classifier that spots greetings by keyword.
#[derive(Debug)]
pub struct TopicStub {
    labels: Vec<String>,
}

impl TopicStub {
    pub fn new() -> Self {
        Self {
            labels: ["greeting", "farewell", "other"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PhraseClassifier for TopicStub {
    fn name(&self) -> &str {
        "topic"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_kind(&self) -> InputKind {
        InputKind::RawText
    }

    fn classify(&self, input: &ClassifierInput) -> Result<LabelDistribution, ClassifierError> {
        let ClassifierInput::RawText(text) = input else {
            return Err(ClassifierError::UnsupportedInput {
                expected: "raw_text",
                actual: input.kind_name(),
            });
        };
        let text = text.to_lowercase();
        let probabilities = if text.contains("hello") {
            [0.8, 0.1, 0.1]
        } else if text.contains("bye") {
            [0.1, 0.8, 0.1]
        } else {
            [0.1, 0.1, 0.8]
        };
        Ok(LabelDistribution::from_pairs(&self.labels, &probabilities)?)
    }
}

/// Feature classifier that reads the terminator symbol.
#[derive(Debug)]
pub struct ShapeClassifier {
    labels: Vec<String>,
}

impl ShapeClassifier {
    pub fn new() -> Self {
        Self {
            labels: vec!["INFORMATION".to_string(), "DECLARATIVE".to_string()],
        }
    }
}

impl PhraseClassifier for ShapeClassifier {
    fn name(&self) -> &str {
        "sentence"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Features(FeaturePipeline::canonical())
    }

    fn classify(&self, input: &ClassifierInput) -> Result<LabelDistribution, ClassifierError> {
        let ClassifierInput::Features(features) = input else {
            return Err(ClassifierError::UnsupportedInput {
                expected: "features",
                actual: input.kind_name(),
            });
        };
        let probabilities = if features.last().text() == "QM" {
            [0.9, 0.1]
        } else {
            [0.2, 0.8]
        };
        Ok(LabelDistribution::from_pairs(&self.labels, &probabilities)?)
    }
}

/// Raw-text classifier that fails on one exact sentence.
#[derive(Debug)]
pub struct FailingClassifier {
    trigger: String,
    labels: Vec<String>,
}

impl FailingClassifier {
    pub fn on(trigger: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            labels: vec!["yes".to_string(), "no".to_string()],
        }
    }
}

impl PhraseClassifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_kind(&self) -> InputKind {
        InputKind::RawText
    }

    fn classify(&self, input: &ClassifierInput) -> Result<LabelDistribution, ClassifierError> {
        match input {
            ClassifierInput::RawText(text) if *text == self.trigger => {
                Err(ClassifierError::Inference(format!("cannot score '{text}'")))
            }
            _ => Ok(LabelDistribution::from_pairs(&self.labels, &[0.5, 0.5])?),
        }
    }
}

pub fn classifier_set(classifiers: Vec<Arc<dyn PhraseClassifier>>) -> ClassifierSet {
    classifiers.into()
}

pub fn hello_sentence() -> Sentence {
    Sentence::from_parts("Hello John", &["Hello", "John"], &["UH", "NNP"])
}

pub fn question_sentence() -> Sentence {
    Sentence::from_parts(
        "What is your name ?",
        &["What", "is", "your", "name", "?"],
        &["WP", "VBZ", "PRP$", "NN", "."],
    )
}

pub fn analyzed_json(sentences: &[Sentence]) -> String {
    AnalyzedText::new(sentences.to_vec())
        .to_json()
        .unwrap()
}
