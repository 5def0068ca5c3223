//! Domain layer for companion-classifier
//!
//! This crate contains the core classification logic, entities, and value objects.
//! It has no dependencies on infrastructure, async runtimes or model engines.
//!
//! # Core Concepts
//!
//! ## Feature Pipeline
//!
//! A POS-tagged sentence is folded into a reduced tag alphabet and rewritten by
//! an ordered list of pure stages into a fixed-width symbolic sequence that
//! encodes the sentence's grammatical shape:
//!
//! - **Relevance filter**: only WH-words, verbs, cue modifiers and terminators survive
//! - **Deduplication**: the earliest marker of each kind wins
//! - **Start marking**: WH/verb openings get a START sentinel
//! - **Padding**: fixed width of eight positions
//! - **Terminator normalization**: `?`, `!` and `.` become QM, EM and DT
//!
//! ## Classification Results
//!
//! Every sentence of a request gets one [`LabelDistribution`] per classifier,
//! collected into a [`ClassificationResult`] in sentence order.

pub mod classification;
pub mod config;
pub mod core;
pub mod features;
pub mod text;

// Re-export commonly used types
pub use classification::{
    distribution::{LabelDistribution, SUM_TOLERANCE},
    input::{ClassifierInput, InputKind},
    question_type::QuestionType,
    result::{ClassificationResult, PredictedSentence},
    schema::{AttributeSchema, NominalAttribute},
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    request::{RequestId, RequestPhase},
};
pub use features::{
    pipeline::{FeaturePipeline, Stage},
    sequence::{FEATURE_WIDTH, FeatureSequence},
    tense::tense_bag,
};
pub use text::{
    sentence::{AnalyzedText, Sentence},
    token::{ReducedTag, Token, normalize_tag},
};
