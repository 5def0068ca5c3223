//! Classifier inputs.

use crate::features::pipeline::FeaturePipeline;
use crate::features::sequence::FeatureSequence;

/// What a classifier consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierInput {
    /// The sentence's raw text.
    RawText(String),
    /// The sentence's transformed feature sequence.
    Features(FeatureSequence),
}

impl ClassifierInput {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClassifierInput::RawText(_) => "raw_text",
            ClassifierInput::Features(_) => "features",
        }
    }
}

/// Which representation a classifier wants, and for feature classifiers the
/// pipeline variant its model was trained with.
#[derive(Debug, Clone)]
pub enum InputKind {
    RawText,
    Features(FeaturePipeline),
}
