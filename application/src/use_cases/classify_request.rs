//! Classify Request use case
//!
//! Handles one classification request end to end:
//!
//! 1. **Fetch**: read the `nlp` field of the request's shared-store entry
//! 2. **Classify**: run every classifier over every sentence, in order
//! 3. **Persist**: write the `classification` field exactly once
//!
//! Persistence is all-or-nothing: a failure on any sentence aborts the request
//! before anything is written.

use crate::config::StoreKeys;
use crate::ports::classifier::{ClassifierError, ClassifierSet, PhraseClassifier};
use crate::ports::shared_store::{SharedStore, StoreError};
use companion_domain::{
    AnalyzedText, ClassificationResult, ClassifierInput, DomainError, PredictedSentence,
    RequestId, RequestPhase,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that abort a classification request
#[derive(Error, Debug)]
pub enum ClassifyRequestError {
    #[error("No '{field}' field for request {id}")]
    NotFound { id: RequestId, field: String },

    #[error("Malformed '{field}' field for request {id}: {source}")]
    Decode {
        id: RequestId,
        field: String,
        source: serde_json::Error,
    },

    #[error("Sentence {index} violates the input contract: {source}")]
    InputContract { index: usize, source: DomainError },

    #[error("Classifier '{classifier}' failed on sentence {index}: {source}")]
    Inference {
        classifier: String,
        index: usize,
        source: ClassifierError,
    },

    #[error("Store read failed: {0}")]
    StoreRead(#[source] StoreError),

    #[error("Store write failed: {0}")]
    StoreWrite(#[source] StoreError),

    #[error("Encoding classification result failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Classification task failed: {0}")]
    Join(String),
}

impl ClassifyRequestError {
    /// Last phase the request reached before failing.
    pub fn phase(&self) -> RequestPhase {
        match self {
            ClassifyRequestError::NotFound { .. }
            | ClassifyRequestError::Decode { .. }
            | ClassifyRequestError::StoreRead(_) => RequestPhase::Received,
            ClassifyRequestError::InputContract { .. }
            | ClassifyRequestError::Inference { .. }
            | ClassifyRequestError::Join(_) => RequestPhase::AnalyzedTextFetched,
            ClassifyRequestError::StoreWrite(_) | ClassifyRequestError::Encode(_) => {
                RequestPhase::SentencesClassified
            }
        }
    }
}

/// Use case for classifying the analyzed text of one request
pub struct ClassifyRequestUseCase<S: SharedStore + 'static> {
    store: Arc<S>,
    classifiers: ClassifierSet,
    keys: StoreKeys,
}

impl<S: SharedStore + 'static> ClassifyRequestUseCase<S> {
    pub fn new(store: Arc<S>, classifiers: ClassifierSet, keys: StoreKeys) -> Self {
        Self {
            store,
            classifiers,
            keys,
        }
    }

    pub fn classifiers(&self) -> &ClassifierSet {
        &self.classifiers
    }

    /// Fetch, classify and persist. Returns the persisted result.
    pub async fn execute(&self, id: &RequestId) -> Result<ClassificationResult, ClassifyRequestError> {
        let text = self.fetch(id).await?;
        debug!(request_id = %id, sentences = text.len(), "analyzed text fetched");

        let result = self.classify(text).await?;
        debug!(request_id = %id, "sentences classified");

        self.persist(id, &result).await?;
        Ok(result)
    }

    /// Read and decode the analyzed text of a request.
    pub async fn fetch(&self, id: &RequestId) -> Result<AnalyzedText, ClassifyRequestError> {
        let content = self
            .store
            .get(id.as_str(), &self.keys.nlp)
            .await
            .map_err(ClassifyRequestError::StoreRead)?
            .ok_or_else(|| ClassifyRequestError::NotFound {
                id: id.clone(),
                field: self.keys.nlp.clone(),
            })?;

        AnalyzedText::from_json(&content).map_err(|source| ClassifyRequestError::Decode {
            id: id.clone(),
            field: self.keys.nlp.clone(),
            source,
        })
    }

    /// Run all classifiers on the blocking pool.
    pub async fn classify(
        &self,
        text: AnalyzedText,
    ) -> Result<ClassificationResult, ClassifyRequestError> {
        let classifiers = Arc::clone(&self.classifiers);
        tokio::task::spawn_blocking(move || classify_sentences(&classifiers, &text))
            .await
            .map_err(|e| ClassifyRequestError::Join(e.to_string()))?
    }

    /// Write the result, overwriting any previous value.
    pub async fn persist(
        &self,
        id: &RequestId,
        result: &ClassificationResult,
    ) -> Result<(), ClassifyRequestError> {
        let content = result.to_json().map_err(ClassifyRequestError::Encode)?;
        self.store
            .put(id.as_str(), &self.keys.classification, content)
            .await
            .map_err(ClassifyRequestError::StoreWrite)
    }
}

/// Classify every sentence with every classifier, preserving sentence order.
///
/// Synchronous and CPU-bound; callers on the async runtime should use
/// [`ClassifyRequestUseCase::classify`].
pub fn classify_sentences(
    classifiers: &[Arc<dyn PhraseClassifier>],
    text: &AnalyzedText,
) -> Result<ClassificationResult, ClassifyRequestError> {
    let mut sentences = Vec::with_capacity(text.len());

    for (index, sentence) in text.sentences.iter().enumerate() {
        debug!(index, raw = %sentence.raw, "received sentence");

        let mut predictions = BTreeMap::new();
        for classifier in classifiers {
            let input = classifier
                .prepare(sentence)
                .map_err(|source| ClassifyRequestError::InputContract { index, source })?;

            if let ClassifierInput::Features(features) = &input {
                trace!(index, classifier = classifier.name(), %features, "transformed sentence");
            }

            let distribution =
                classifier
                    .classify(&input)
                    .map_err(|source| ClassifyRequestError::Inference {
                        classifier: classifier.name().to_string(),
                        index,
                        source,
                    })?;
            predictions.insert(classifier.name().to_string(), distribution);
        }

        debug!(index, ?predictions, "evaluated classification");
        sentences.push(PredictedSentence::new(predictions));
    }

    Ok(ClassificationResult::new(sentences))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FailingClassifier, MockStore, ShapeClassifier, TopicStub, analyzed_json, classifier_set,
        hello_sentence, question_sentence,
    };
    use companion_domain::Sentence;

    fn use_case(store: Arc<MockStore>, classifiers: ClassifierSet) -> ClassifyRequestUseCase<MockStore> {
        ClassifyRequestUseCase::new(store, classifiers, StoreKeys::default())
    }

    fn default_classifiers() -> ClassifierSet {
        classifier_set(vec![Arc::new(TopicStub::new()), Arc::new(ShapeClassifier::new())])
    }

    #[tokio::test]
    async fn test_execute_persists_in_sentence_order() {
        let store = Arc::new(MockStore::new());
        store
            .seed("job-1", "nlp", analyzed_json(&[question_sentence(), hello_sentence()]))
            .await;

        let result = use_case(Arc::clone(&store), default_classifiers())
            .execute(&"job-1".into())
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.sentences[0].get("sentence").unwrap().is_most_likely("INFORMATION"));
        assert!(result.sentences[1].get("sentence").unwrap().is_most_likely("DECLARATIVE"));
        assert!(result.sentences[1].get("topic").unwrap().is_most_likely("greeting"));

        let stored = store.read("job-1", "classification").await.unwrap();
        assert_eq!(ClassificationResult::from_json(&stored).unwrap(), result);
    }

    #[tokio::test]
    async fn test_missing_nlp_is_not_found() {
        let store = Arc::new(MockStore::new());
        let err = use_case(Arc::clone(&store), default_classifiers())
            .execute(&"unknown".into())
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifyRequestError::NotFound { ref field, .. } if field == "nlp"));
        assert_eq!(err.phase(), RequestPhase::Received);
        assert_eq!(store.writes().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_nlp_is_decode_error() {
        let store = Arc::new(MockStore::new());
        store.seed("job-2", "nlp", "{\"sentences\": [".to_string()).await;

        let err = use_case(Arc::clone(&store), default_classifiers())
            .execute(&"job-2".into())
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifyRequestError::Decode { .. }));
        assert_eq!(store.read("job-2", "classification").await, None);
    }

    #[tokio::test]
    async fn test_failure_on_later_sentence_writes_nothing() {
        let store = Arc::new(MockStore::new());
        let boom = Sentence::from_parts("boom", &["boom"], &["NN"]);
        store
            .seed("job-3", "nlp", analyzed_json(&[hello_sentence(), question_sentence(), boom]))
            .await;
        let classifiers =
            classifier_set(vec![Arc::new(TopicStub::new()), Arc::new(FailingClassifier::on("boom"))]);

        let err = use_case(Arc::clone(&store), classifiers)
            .execute(&"job-3".into())
            .await
            .unwrap_err();

        match &err {
            ClassifyRequestError::Inference {
                classifier, index, ..
            } => {
                assert_eq!(classifier, "failing");
                assert_eq!(*index, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.phase(), RequestPhase::AnalyzedTextFetched);
        assert_eq!(store.read("job-3", "classification").await, None);
    }

    #[tokio::test]
    async fn test_length_mismatch_aborts_request() {
        let store = Arc::new(MockStore::new());
        let broken = Sentence::from_parts("Go now", &["Go", "now"], &["VB"]);
        store
            .seed("job-4", "nlp", analyzed_json(&[hello_sentence(), broken]))
            .await;

        let err = use_case(Arc::clone(&store), default_classifiers())
            .execute(&"job-4".into())
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifyRequestError::InputContract { index: 1, .. }));
        assert_eq!(store.writes().await, 0);
    }

    #[tokio::test]
    async fn test_write_failure_reports_classified_phase() {
        let store = Arc::new(MockStore::new().failing_writes());
        store.seed("job-5", "nlp", analyzed_json(&[hello_sentence()])).await;

        let err = use_case(Arc::clone(&store), default_classifiers())
            .execute(&"job-5".into())
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifyRequestError::StoreWrite(_)));
        assert_eq!(err.phase(), RequestPhase::SentencesClassified);
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_value() {
        let store = Arc::new(MockStore::new());
        store.seed("job-6", "nlp", analyzed_json(&[hello_sentence()])).await;
        store.seed("job-6", "classification", "stale".to_string()).await;

        use_case(Arc::clone(&store), default_classifiers())
            .execute(&"job-6".into())
            .await
            .unwrap();

        let stored = store.read("job-6", "classification").await.unwrap();
        assert_ne!(stored, "stale");
    }

    #[test]
    fn test_classify_sentences_empty_text() {
        let result = classify_sentences(&default_classifiers(), &AnalyzedText::default()).unwrap();
        assert!(result.is_empty());
    }
}
