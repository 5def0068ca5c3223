//! Infrastructure layer for companion-classifier
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, model resource loading, and configuration
//! file loading.

pub mod classifiers;
pub mod config;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use classifiers::{ClassifierRegistry, SentenceTypeClassifier, TopicClassifier};
pub use config::{
    ConfigLoader, FileConfig, FileDispatchConfig, FileLoggingConfig, FileModelsConfig,
    FileSentenceModelConfig, FileTopicModelConfig,
};
pub use models::{DecisionTreeModel, ModelLoadError, ModelResource, NaiveBayesTextModel};
pub use store::InMemorySharedStore;
