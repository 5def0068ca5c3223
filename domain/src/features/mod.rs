//! Feature extraction.
//!
//! - [`pipeline::FeaturePipeline`]: tagged sentence to fixed-width symbolic sequence
//! - [`stages`]: the individual rewriting stages
//! - [`tense::tense_bag`]: verb-form bag for tense detection

pub mod pipeline;
pub mod sequence;
pub mod stages;
pub mod tense;
