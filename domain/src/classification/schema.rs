//! Nominal attribute schemas.
//!
//! A feature-sequence model was trained against a fixed set of legal values
//! per position. The schema is built once per classifier and used both to
//! check the model at load time and to map feature symbols to nominal indices.

use crate::core::error::DomainError;
use crate::features::sequence::{FEATURE_WIDTH, FeatureSequence};
use serde::{Deserialize, Serialize};

/// Legal values of the `start` position.
pub const START_VALUES: [&str; 2] = ["(^)", "(*)"];

/// Legal values of the inner positions `p1`..`p6`.
pub const INNER_VALUES: [&str; 13] = [
    "(what/WHQ)",
    "(_/VERB)",
    "(*)",
    "(how/WHQ)",
    "(much/JT)",
    "(many/JT)",
    "(often/JT)",
    "(far/JT)",
    "(when/WHQ)",
    "(whose/WHQ)",
    "(who/WHQ)",
    "(where/WHQ)",
    "(why/WHQ)",
];

/// Legal values of the `end` position.
pub const END_VALUES: [&str; 3] = ["(DT/.)", "(EM/.)", "(QM/.)"];

/// Legal values of the `end` position when terminators are left as typed.
pub const RAW_END_VALUES: [&str; 3] = ["(./.)", "(!/.)", "(?/.)"];

/// An attribute with an ordered list of legal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominalAttribute {
    name: String,
    values: Vec<String>,
}

impl NominalAttribute {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| v.to_string()).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// Class attribute plus one nominal attribute per feature position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    class: NominalAttribute,
    features: Vec<NominalAttribute>,
}

impl AttributeSchema {
    pub fn new(class: NominalAttribute, features: Vec<NominalAttribute>) -> Result<Self, DomainError> {
        for attribute in std::iter::once(&class).chain(&features) {
            if attribute.values.is_empty() {
                return Err(DomainError::InvalidSchema(format!(
                    "attribute '{}' has no legal values",
                    attribute.name
                )));
            }
            for (i, value) in attribute.values.iter().enumerate() {
                if attribute.values[..i].contains(value) {
                    return Err(DomainError::InvalidSchema(format!(
                        "attribute '{}' lists '{value}' twice",
                        attribute.name
                    )));
                }
            }
        }
        Ok(Self { class, features })
    }

    /// Schema of the sentence-type model: `type`, `start`, `p1`..`p6`, `end`.
    pub fn sentence_type(labels: &[String]) -> Result<Self, DomainError> {
        Self::sentence_type_with_end(labels, &END_VALUES)
    }

    /// Same layout, for models trained without terminator normalization.
    pub fn sentence_type_raw(labels: &[String]) -> Result<Self, DomainError> {
        Self::sentence_type_with_end(labels, &RAW_END_VALUES)
    }

    fn sentence_type_with_end(labels: &[String], end: &[&str]) -> Result<Self, DomainError> {
        let mut features = Vec::with_capacity(FEATURE_WIDTH);
        features.push(NominalAttribute::from_strs("start", &START_VALUES));
        for position in 1..FEATURE_WIDTH - 1 {
            features.push(NominalAttribute::from_strs(
                format!("p{position}"),
                &INNER_VALUES,
            ));
        }
        features.push(NominalAttribute::from_strs("end", end));
        Self::new(NominalAttribute::new("type", labels.to_vec()), features)
    }

    pub fn class(&self) -> &NominalAttribute {
        &self.class
    }

    pub fn class_labels(&self) -> &[String] {
        self.class.values()
    }

    pub fn features(&self) -> &[NominalAttribute] {
        &self.features
    }

    /// Cardinality of each feature attribute, in position order.
    pub fn cardinalities(&self) -> Vec<usize> {
        self.features.iter().map(NominalAttribute::cardinality).collect()
    }

    /// Map every position to its nominal index, failing on the first illegal value.
    pub fn validate(&self, sequence: &FeatureSequence) -> Result<Vec<usize>, DomainError> {
        if sequence.len() != self.features.len() {
            return Err(DomainError::FeatureWidth {
                expected: self.features.len(),
                actual: sequence.len(),
            });
        }
        self.features
            .iter()
            .zip(sequence.symbols())
            .map(|(attribute, symbol)| {
                attribute
                    .index_of(&symbol)
                    .ok_or_else(|| DomainError::SchemaViolation {
                        attribute: attribute.name.clone(),
                        value: symbol,
                    })
            })
            .collect()
    }
}
