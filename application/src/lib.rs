//! Application layer for companion-classifier
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DispatchConfig, StoreKeys};
pub use ports::{
    classifier::{ClassifierError, ClassifierSet, PhraseClassifier},
    shared_store::{SharedStore, StoreError},
};
pub use use_cases::classify_request::{
    ClassifyRequestError, ClassifyRequestUseCase, classify_sentences,
};
pub use use_cases::dispatch::{
    ClassificationDispatcher, ClassificationRequest, DispatchError, DispatchHandle,
    DispatchSummary, request_channel,
};
