//! Phrase classifier port
//!
//! The statistical engines (naive Bayes, decision trees) are external
//! collaborators. This port is the single capability the use cases see: a
//! named classifier that consumes either raw text or a feature sequence and
//! returns a distribution over its registered labels.
//!
//! Classifiers are loaded once at startup, never mutated afterwards, and
//! invoked concurrently from the blocking pool.

use companion_domain::{
    ClassifierInput, DomainError, InputKind, LabelDistribution, Sentence,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a classifier while scoring one input
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Classifier expects {expected} input, got {actual}")]
    UnsupportedInput {
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A loaded, immutable classifier.
pub trait PhraseClassifier: Send + Sync + fmt::Debug {
    /// Result name under which this classifier's distribution is stored.
    fn name(&self) -> &str;

    /// Registered labels, in registration order.
    fn labels(&self) -> &[String];

    /// Representation this classifier consumes.
    fn input_kind(&self) -> InputKind;

    /// Score one input.
    fn classify(&self, input: &ClassifierInput) -> Result<LabelDistribution, ClassifierError>;

    /// Build the input this classifier consumes from a sentence.
    fn prepare(&self, sentence: &Sentence) -> Result<ClassifierInput, DomainError> {
        match self.input_kind() {
            InputKind::RawText => {
                sentence.validate()?;
                Ok(ClassifierInput::RawText(sentence.raw.clone()))
            }
            InputKind::Features(pipeline) => {
                Ok(ClassifierInput::Features(pipeline.transform(sentence)?))
            }
        }
    }
}

/// The immutable set of classifiers shared by all requests.
pub type ClassifierSet = Arc<[Arc<dyn PhraseClassifier>]>;
