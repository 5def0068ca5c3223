//! Analyzed sentences as delivered by the upstream NLP stage.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One sentence with index-aligned tokens and POS tags.
///
/// Unknown JSON fields are ignored; the upstream producer adds fields freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub raw: String,
    pub tokens: Vec<String>,
    pub pos_tags: Vec<String>,
    /// Lemmas per token, when a lemmatizer ran upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<Option<String>>>,
}

impl Sentence {
    pub fn new(raw: impl Into<String>, tokens: Vec<String>, pos_tags: Vec<String>) -> Self {
        Self {
            raw: raw.into(),
            tokens,
            pos_tags,
            lemmas: None,
        }
    }

    pub fn with_lemmas(mut self, lemmas: Vec<Option<String>>) -> Self {
        self.lemmas = Some(lemmas);
        self
    }

    /// Convenience constructor for string slices.
    pub fn from_parts(raw: &str, tokens: &[&str], pos_tags: &[&str]) -> Self {
        Self::new(
            raw,
            tokens.iter().map(|t| t.to_string()).collect(),
            pos_tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    /// Check the parallel-array contract.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tokens.is_empty() {
            return Err(DomainError::input_contract("sentence has no tokens"));
        }
        if self.tokens.len() != self.pos_tags.len() {
            return Err(DomainError::input_contract(format!(
                "{} tokens but {} POS tags",
                self.tokens.len(),
                self.pos_tags.len()
            )));
        }
        if let Some(lemmas) = &self.lemmas
            && lemmas.len() != self.tokens.len()
        {
            return Err(DomainError::input_contract(format!(
                "{} tokens but {} lemmas",
                self.tokens.len(),
                lemmas.len()
            )));
        }
        Ok(())
    }

    /// Lemma of the token at `index`, if known.
    pub fn lemma(&self, index: usize) -> Option<&str> {
        self.lemmas
            .as_ref()
            .and_then(|lemmas| lemmas.get(index))
            .and_then(|lemma| lemma.as_deref())
    }
}

/// All sentences of one request, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedText {
    pub sentences: Vec<Sentence>,
}

impl AnalyzedText {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
