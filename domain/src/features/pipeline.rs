//! Feature pipeline: stage ordering as data.
//!
//! A [`FeaturePipeline`] is an ordered list of named stage functions applied as a
//! fold. Two variants exist: the canonical five-stage pipeline and the earlier
//! revision without terminator normalization. Models trained against one variant
//! must be served with the same variant.
//!
//! # Example
//!
//! ```
//! use companion_domain::{FeaturePipeline, Sentence};
//!
//! let sentence = Sentence::from_parts(
//!     "What is your name?",
//!     &["What", "is", "your", "name", "?"],
//!     &["WP", "VBZ", "PRP$", "NN", "."],
//! );
//! let features = FeaturePipeline::canonical().transform(&sentence).unwrap();
//! assert_eq!(features.symbols()[0], "(^)");
//! assert_eq!(features.symbols()[7], "(QM/.)");
//! ```

use super::sequence::FeatureSequence;
use super::stages;
use crate::core::error::DomainError;
use crate::text::sentence::Sentence;
use crate::text::token::{ReducedTag, TERMINATOR_RAW_TAG, Token, normalize_tag};

/// A pure token rewriting step.
pub type StageFn = fn(Vec<Token>) -> Vec<Token>;

/// A stage with a name for logging and inspection.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub apply: StageFn,
}

impl Stage {
    pub const fn new(name: &'static str, apply: StageFn) -> Self {
        Self { name, apply }
    }
}

pub const RELEVANCE_FILTER: Stage = Stage::new("relevance_filter", stages::relevance_filter);
pub const DEDUPLICATE: Stage = Stage::new("deduplicate", stages::deduplicate);
pub const MARK_START: Stage = Stage::new("mark_start", stages::mark_start);
pub const PAD: Stage = Stage::new("pad", stages::pad);
pub const NORMALIZE_TERMINATOR: Stage =
    Stage::new("normalize_terminator", stages::normalize_terminator);

/// Ordered stage list turning a tagged sentence into a [`FeatureSequence`].
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    stages: Vec<Stage>,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::canonical()
    }
}

impl FeaturePipeline {
    /// All five stages, terminator normalization last.
    pub fn canonical() -> Self {
        Self::from_stages(vec![
            RELEVANCE_FILTER,
            DEDUPLICATE,
            MARK_START,
            PAD,
            NORMALIZE_TERMINATOR,
        ])
    }

    /// The earlier revision: terminators keep their literal text.
    pub fn without_terminator_normalization() -> Self {
        Self::from_stages(vec![RELEVANCE_FILTER, DEDUPLICATE, MARK_START, PAD])
    }

    pub fn from_stages(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Whether the last stage rewrites terminators to QM/EM/DT.
    pub fn normalizes_terminators(&self) -> bool {
        self.stages
            .iter()
            .any(|stage| stage.name == NORMALIZE_TERMINATOR.name)
    }

    /// Validate the sentence, build its token sequence and run every stage.
    pub fn transform(&self, sentence: &Sentence) -> Result<FeatureSequence, DomainError> {
        let tokens = assemble(sentence)?;
        self.transform_tokens(tokens)
    }

    /// Run every stage over an already assembled token sequence.
    pub fn transform_tokens(&self, tokens: Vec<Token>) -> Result<FeatureSequence, DomainError> {
        let tokens = self
            .stages
            .iter()
            .fold(tokens, |tokens, stage| (stage.apply)(tokens));
        FeatureSequence::from_tokens(tokens)
    }
}

/// Zip tokens with their reduced tags and guarantee a trailing terminator.
///
/// Text is lower-cased. Only the final position may carry the terminator tag:
/// a `.` tag in the middle of a sentence is kept as an ordinary tag, so the
/// deduplication stage can never drop the real terminator.
pub fn assemble(sentence: &Sentence) -> Result<Vec<Token>, DomainError> {
    sentence.validate()?;

    let last = sentence.tokens.len() - 1;
    let mut tokens: Vec<Token> = sentence
        .tokens
        .iter()
        .zip(&sentence.pos_tags)
        .enumerate()
        .map(|(index, (text, raw_tag))| {
            let tag = match normalize_tag(raw_tag) {
                ReducedTag::Terminator if index != last => ReducedTag::Other(raw_tag.clone()),
                tag => tag,
            };
            Token::new(text.to_lowercase(), tag)
        })
        .collect();

    if sentence.pos_tags[last] != TERMINATOR_RAW_TAG {
        tokens.push(Token::period());
    }

    Ok(tokens)
}
