//! Label probability distributions.

use crate::core::error::DomainError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Tolerance used when checking that a distribution sums to one.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Mapping from label to probability, kept in registration order.
///
/// Order matters: [`LabelDistribution::most_likely`] breaks ties in favour of
/// the label registered first. Serializes as a JSON object in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelDistribution {
    entries: Vec<(String, f64)>,
}

impl LabelDistribution {
    /// Pair registered labels with the engine's raw probabilities.
    pub fn from_pairs(labels: &[String], probabilities: &[f64]) -> Result<Self, DomainError> {
        if labels.len() != probabilities.len() {
            return Err(DomainError::InvalidDistribution(format!(
                "{} labels but {} probabilities",
                labels.len(),
                probabilities.len()
            )));
        }
        Self::from_entries(
            labels
                .iter()
                .cloned()
                .zip(probabilities.iter().copied())
                .collect(),
        )
    }

    pub fn from_entries(entries: Vec<(String, f64)>) -> Result<Self, DomainError> {
        for (i, (label, probability)) in entries.iter().enumerate() {
            if !probability.is_finite() || *probability < 0.0 {
                return Err(DomainError::InvalidDistribution(format!(
                    "probability for '{label}' is {probability}"
                )));
            }
            if entries[..i].iter().any(|(seen, _)| seen == label) {
                return Err(DomainError::InvalidDistribution(format!(
                    "duplicate label '{label}'"
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Whether the values sum to one within [`SUM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= SUM_TOLERANCE
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label with the highest probability; the earliest label wins a tie.
    pub fn most_likely(&self) -> Option<&str> {
        let mut best: Option<&(String, f64)> = None;
        for entry in &self.entries {
            match best {
                Some((_, p)) if entry.1 <= *p => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(label, _)| label.as_str())
    }

    /// True iff `label` is [`Self::most_likely`].
    pub fn is_most_likely(&self, label: &str) -> bool {
        self.most_likely() == Some(label)
    }
}

impl Serialize for LabelDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, probability) in &self.entries {
            map.serialize_entry(label, probability)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = LabelDistribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from label to probability")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, probability)) = access.next_entry::<String, f64>()? {
                    entries.push((label, probability));
                }
                LabelDistribution::from_entries(entries).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}
