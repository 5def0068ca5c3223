//! Multinomial naive Bayes over words.

use companion_domain::{DomainError, LabelDistribution};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// Words too common in dialogue to carry topic information.
pub const STOPWORDS: [&str; 2] = ["i", "it"];

const WORD_SEPARATOR: &str = r"[^\p{L}\p{N}]+";

#[derive(Debug, Deserialize)]
struct NaiveBayesFile {
    labels: Vec<String>,
    log_priors: HashMap<String, f64>,
    log_likelihoods: HashMap<String, HashMap<String, f64>>,
    unknown_log_likelihood: HashMap<String, f64>,
}

/// Label-aligned log probabilities plus the word tokenizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "NaiveBayesFile")]
pub struct NaiveBayesTextModel {
    labels: Vec<String>,
    log_priors: Vec<f64>,
    log_likelihoods: Vec<HashMap<String, f64>>,
    unknown_log_likelihood: Vec<f64>,
    separator: Regex,
}

impl TryFrom<NaiveBayesFile> for NaiveBayesTextModel {
    type Error = String;

    fn try_from(mut file: NaiveBayesFile) -> Result<Self, Self::Error> {
        if file.labels.is_empty() {
            return Err("naive bayes model has no labels".to_string());
        }

        let mut log_priors = Vec::with_capacity(file.labels.len());
        let mut log_likelihoods = Vec::with_capacity(file.labels.len());
        let mut unknown_log_likelihood = Vec::with_capacity(file.labels.len());
        for label in &file.labels {
            let prior = file
                .log_priors
                .remove(label)
                .ok_or_else(|| format!("no log prior for label '{label}'"))?;
            let unknown = file
                .unknown_log_likelihood
                .remove(label)
                .ok_or_else(|| format!("no unknown-word log likelihood for label '{label}'"))?;
            let words = file.log_likelihoods.remove(label).unwrap_or_default();

            if !prior.is_finite() || !unknown.is_finite() || words.values().any(|v| !v.is_finite()) {
                return Err(format!("non-finite log probability for label '{label}'"));
            }
            log_priors.push(prior);
            unknown_log_likelihood.push(unknown);
            log_likelihoods.push(words);
        }

        let separator = Regex::new(WORD_SEPARATOR).map_err(|e| e.to_string())?;
        Ok(Self {
            labels: file.labels,
            log_priors,
            log_likelihoods,
            unknown_log_likelihood,
            separator,
        })
    }
}

impl NaiveBayesTextModel {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Lower-cased words of `text`, stopwords removed.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.separator
            .split(&text.to_lowercase())
            .filter(|word| !word.is_empty() && !STOPWORDS.contains(word))
            .map(str::to_string)
            .collect()
    }

    /// Posterior probabilities in label order. Always sums to one.
    pub fn posterior(&self, text: &str) -> Vec<f64> {
        let words = self.words(text);
        let scores: Vec<f64> = (0..self.labels.len())
            .map(|i| {
                let likelihoods = &self.log_likelihoods[i];
                words.iter().fold(self.log_priors[i], |score, word| {
                    score
                        + likelihoods
                            .get(word)
                            .copied()
                            .unwrap_or(self.unknown_log_likelihood[i])
                })
            })
            .collect();

        // log-sum-exp
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut posterior: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        super::normalize(&mut posterior);
        posterior
    }

    /// Posterior paired by position with `labels`, which may rename the
    /// model's classes.
    pub fn distribution(
        &self,
        labels: &[String],
        text: &str,
    ) -> Result<LabelDistribution, DomainError> {
        LabelDistribution::from_pairs(labels, &self.posterior(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_domain::SUM_TOLERANCE;

    const GREETINGS: &str = r#"{
        "kind": "naive_bayes_text",
        "labels": ["greeting", "farewell", "weather", "other"],
        "log_priors": {"greeting": -1.386, "farewell": -1.386, "weather": -1.386, "other": -1.386},
        "log_likelihoods": {
            "greeting": {"hello": -0.5, "hi": -1.0, "john": -4.0},
            "farewell": {"bye": -0.5, "goodbye": -0.7},
            "weather": {"rain": -0.6, "sunny": -0.9},
            "other": {"john": -3.0}
        },
        "unknown_log_likelihood": {"greeting": -6.0, "farewell": -6.0, "weather": -6.0, "other": -4.0}
    }"#;

    #[test]
    fn test_hello_john_is_greeting() {
        let model = NaiveBayesTextModel::from_json(GREETINGS).unwrap();
        let distribution = model.distribution(model.labels(), "Hello John").unwrap();

        assert!((distribution.sum() - 1.0).abs() < SUM_TOLERANCE);
        assert!(distribution.is_most_likely("greeting"));
        assert_eq!(distribution.len(), 4);
    }

    #[test]
    fn test_words_drop_stopwords_and_punctuation() {
        let model = NaiveBayesTextModel::from_json(GREETINGS).unwrap();
        assert_eq!(model.words("I think it's sunny, John!"), vec!["think", "s", "sunny", "john"]);
    }

    #[test]
    fn test_empty_text_falls_back_to_priors() {
        let model = NaiveBayesTextModel::from_json(GREETINGS).unwrap();
        let posterior = model.posterior("");
        for p in &posterior {
            assert!((p - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_long_text_does_not_underflow() {
        let model = NaiveBayesTextModel::from_json(GREETINGS).unwrap();
        let text = "unknown ".repeat(500);
        let distribution = model.distribution(model.labels(), &text).unwrap();
        assert!((distribution.sum() - 1.0).abs() < SUM_TOLERANCE);
        assert!(distribution.is_most_likely("other"));
    }

    #[test]
    fn test_missing_prior_is_rejected() {
        let err = NaiveBayesTextModel::from_json(
            r#"{"labels": ["a", "b"], "log_priors": {"a": 0.0},
                "log_likelihoods": {}, "unknown_log_likelihood": {"a": -1.0, "b": -1.0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no log prior for label 'b'"));
    }
}
