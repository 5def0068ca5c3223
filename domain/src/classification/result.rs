//! Classification results written back to the shared store.

use super::distribution::LabelDistribution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every classifier's distribution for one sentence, keyed by classifier name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictedSentence {
    pub predictions: BTreeMap<String, LabelDistribution>,
}

impl PredictedSentence {
    pub fn new(predictions: BTreeMap<String, LabelDistribution>) -> Self {
        Self { predictions }
    }

    pub fn get(&self, classifier: &str) -> Option<&LabelDistribution> {
        self.predictions.get(classifier)
    }
}

/// One [`PredictedSentence`] per input sentence, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub sentences: Vec<PredictedSentence>,
}

impl ClassificationResult {
    pub fn new(sentences: Vec<PredictedSentence>) -> Self {
        Self { sentences }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let topic = LabelDistribution::from_entries(vec![
            ("greeting".to_string(), 0.9),
            ("other".to_string(), 0.1),
        ])
        .unwrap();
        let mut predictions = BTreeMap::new();
        predictions.insert("topic".to_string(), topic);
        let result = ClassificationResult::new(vec![PredictedSentence::new(predictions)]);

        assert_eq!(
            result.to_json().unwrap(),
            r#"{"sentences":[{"predictions":{"topic":{"greeting":0.9,"other":0.1}}}]}"#
        );
        let parsed = ClassificationResult::from_json(&result.to_json().unwrap()).unwrap();
        assert_eq!(parsed, result);
    }
}
