//! Concrete [`PhraseClassifier`](companion_application::PhraseClassifier) adapters
//! backed by the serialized models, and the startup registry that loads them.

pub mod registry;
pub mod sentence_type;
pub mod topic;

#[cfg(test)]
pub(crate) mod fixtures;

pub use registry::ClassifierRegistry;
pub use sentence_type::SentenceTypeClassifier;
pub use topic::TopicClassifier;
