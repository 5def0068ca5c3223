//! Startup loading of the configured classifiers.

use super::{SentenceTypeClassifier, TopicClassifier};
use crate::config::FileModelsConfig;
use crate::models::{ModelLoadError, ModelResource};
use companion_application::{ClassifierSet, PhraseClassifier};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Loads every enabled classifier once. The returned set is immutable and
/// shared by all requests.
pub struct ClassifierRegistry;

impl ClassifierRegistry {
    pub fn load(config: &FileModelsConfig) -> Result<ClassifierSet, ModelLoadError> {
        let mut classifiers: Vec<Arc<dyn PhraseClassifier>> = Vec::new();

        if config.topic.enabled {
            let path = required_path("models.topic", config.topic.path.as_ref())?;
            let model = match ModelResource::load(path)? {
                ModelResource::NaiveBayesText(model) => model,
                other => return Err(wrong_kind("models.topic", "naive_bayes_text", &other)),
            };
            let classifier =
                TopicClassifier::new(&config.topic.name, config.topic.labels.clone(), model)?;
            info!(
                name = %config.topic.name,
                path = %path.display(),
                labels = ?classifier.labels(),
                "Loaded topic classifier"
            );
            classifiers.push(Arc::new(classifier));
        }

        if config.sentence.enabled {
            let path = required_path("models.sentence", config.sentence.path.as_ref())?;
            let model = match ModelResource::load(path)? {
                ModelResource::DecisionTree(model) => model,
                other => return Err(wrong_kind("models.sentence", "decision_tree", &other)),
            };
            let classifier = SentenceTypeClassifier::new(
                &config.sentence.name,
                config.sentence.labels.clone(),
                config.sentence.terminator_normalization,
                model,
            )?;
            info!(
                name = %config.sentence.name,
                path = %path.display(),
                terminator_normalization = config.sentence.terminator_normalization,
                labels = ?classifier.labels(),
                "Loaded sentence type classifier"
            );
            classifiers.push(Arc::new(classifier));
        }

        Ok(classifiers.into())
    }
}

fn required_path<'a>(section: &str, path: Option<&'a PathBuf>) -> Result<&'a Path, ModelLoadError> {
    path.map(PathBuf::as_path)
        .ok_or_else(|| ModelLoadError::NotConfigured(section.to_string()))
}

fn wrong_kind(section: &str, expected: &str, found: &ModelResource) -> ModelLoadError {
    ModelLoadError::Schema(format!(
        "{section} expects a {expected} model, found {}",
        found.kind_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::fixtures::{TOPIC_MODEL, sentence_model};
    use companion_domain::{SUM_TOLERANCE, Sentence};
    use std::fs;

    fn write_models(dir: &Path) -> FileModelsConfig {
        let topic = dir.join("topic.json");
        let sentence = dir.join("sentence.json");
        fs::write(&topic, TOPIC_MODEL).unwrap();
        fs::write(&sentence, sentence_model(true)).unwrap();

        let mut config = FileModelsConfig::default();
        config.topic.path = Some(topic);
        config.sentence.path = Some(sentence);
        config
    }

    #[test]
    fn test_load_both_classifiers() {
        let dir = tempfile::tempdir().unwrap();
        let classifiers = ClassifierRegistry::load(&write_models(dir.path())).unwrap();

        let names: Vec<_> = classifiers.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["topic", "sentence"]);

        let hello = Sentence::from_parts("Hello John", &["Hello", "John"], &["UH", "NNP"]);
        let topic = &classifiers[0];
        let distribution = topic.classify(&topic.prepare(&hello).unwrap()).unwrap();
        assert!((distribution.sum() - 1.0).abs() < SUM_TOLERANCE);
        assert!(distribution.is_most_likely("greeting"));
    }

    #[test]
    fn test_classifier_set_is_debug() {
        let dir = tempfile::tempdir().unwrap();
        let classifiers = ClassifierRegistry::load(&write_models(dir.path())).unwrap();

        let rendered = format!("{classifiers:?}");
        assert!(rendered.contains("TopicClassifier"));
        assert!(rendered.contains("SentenceTypeClassifier"));
    }

    #[test]
    fn test_disabled_classifier_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_models(dir.path());
        config.sentence.enabled = false;
        config.sentence.path = None;

        let classifiers = ClassifierRegistry::load(&config).unwrap();
        assert_eq!(classifiers.len(), 1);
    }

    #[test]
    fn test_missing_path() {
        let err = ClassifierRegistry::load(&FileModelsConfig::default()).unwrap_err();
        assert!(matches!(err, ModelLoadError::NotConfigured(ref s) if s == "models.topic"));
    }

    #[test]
    fn test_wrong_model_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_models(dir.path());
        config.sentence.path = config.topic.path.clone();

        let err = ClassifierRegistry::load(&config).unwrap_err();
        assert!(err.to_string().contains("expects a decision_tree model"));
    }

    #[test]
    fn test_corrupt_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_models(dir.path());
        fs::write(config.topic.path.as_ref().unwrap(), "{ not json").unwrap();

        let err = ClassifierRegistry::load(&config).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse(_)));
    }
}
