//! Serialized classifier models.
//!
//! Inference-only readers for the two model formats the classifiers ship
//! with. Both are JSON documents carrying a `kind` discriminator:
//!
//! - `naive_bayes_text`: multinomial naive Bayes over lower-cased words
//! - `decision_tree`: nominal decision tree over the feature sequence
//!
//! Models are loaded once at startup. Anything wrong with a model file is a
//! [`ModelLoadError`] and the process does not start.

pub mod decision_tree;
pub mod naive_bayes;

pub use decision_tree::{DecisionTreeModel, TreeNode};
pub use naive_bayes::NaiveBayesTextModel;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a model resource
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Cannot read model file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{what} cardinality mismatch: registered {expected}, model has {actual}")]
    Cardinality {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Model does not fit its classifier: {0}")]
    Schema(String),

    #[error("No model path configured for {0}")]
    NotConfigured(String),
}

/// A model file of any supported kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelResource {
    NaiveBayesText(NaiveBayesTextModel),
    DecisionTree(DecisionTreeModel),
}

impl ModelResource {
    pub fn from_json(content: &str) -> Result<Self, ModelLoadError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json(&content)?;
        debug!(path = %path.display(), kind = model.kind_name(), "Loaded model");
        Ok(model)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ModelResource::NaiveBayesText(_) => "naive_bayes_text",
            ModelResource::DecisionTree(_) => "decision_tree",
        }
    }

    pub fn labels(&self) -> &[String] {
        match self {
            ModelResource::NaiveBayesText(model) => model.labels(),
            ModelResource::DecisionTree(model) => model.labels(),
        }
    }
}

/// Normalize raw scores in place. A zero vector becomes uniform.
pub(crate) fn normalize(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter_mut().for_each(|v| *v /= total);
    } else if !values.is_empty() {
        let uniform = 1.0 / values.len() as f64;
        values.iter_mut().for_each(|v| *v = uniform);
    }
}
