//! Small model files for tests.

use crate::config::DEFAULT_SENTENCE_LABELS;
use companion_domain::AttributeSchema;
use serde_json::{Value, json};

pub const TOPIC_MODEL: &str = r#"{
    "kind": "naive_bayes_text",
    "labels": ["greeting", "farewell", "weather", "other"],
    "log_priors": {"greeting": -1.5, "farewell": -1.5, "weather": -1.5, "other": -1.0},
    "log_likelihoods": {
        "greeting": {"hello": -0.7, "hi": -1.2, "morning": -2.0},
        "farewell": {"bye": -0.7, "goodbye": -0.9, "later": -2.0},
        "weather": {"rain": -0.8, "sunny": -1.0, "cold": -1.5},
        "other": {}
    },
    "unknown_log_likelihood": {"greeting": -7.0, "farewell": -7.0, "weather": -7.0, "other": -5.0}
}"#;

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Leaf weighted towards one sentence label.
fn peak(label: &str) -> Value {
    let weights: Vec<f64> = DEFAULT_SENTENCE_LABELS
        .iter()
        .map(|l| if *l == label { 9.0 } else { 1.0 })
        .collect();
    json!(weights)
}

/// Decision tree over the full sentence-type schema.
pub fn sentence_model(normalized: bool) -> String {
    let labels = strings(&DEFAULT_SENTENCE_LABELS);
    let (schema, question, statement) = if normalized {
        (AttributeSchema::sentence_type(&labels), "(QM/.)", "(DT/.)")
    } else {
        (AttributeSchema::sentence_type_raw(&labels), "(?/.)", "(./.)")
    };
    let schema = schema.unwrap();

    let question_branch = json!({
        "split": 1,
        "children": {
            "(what/WHQ)": {"leaf": peak("INFORMATION")},
            "(who/WHQ)": {"leaf": peak("PEOPLE")},
            "(how/WHQ)": {
                "split": 2,
                "children": {"(much/JT)": {"leaf": peak("QUANTITY")}},
                "default": peak("DESCRIPTION")
            }
        },
        "default": peak("CHOICE")
    });
    let statement_branch = json!({
        "split": 0,
        "children": {"(^)": {"leaf": peak("IMPERATIVE")}},
        "default": peak("DECLARATIVE")
    });

    json!({
        "kind": "decision_tree",
        "labels": labels,
        "attributes": schema.features(),
        "root": {
            "split": 7,
            "children": {question: question_branch, statement: statement_branch},
            "default": peak("DECLARATIVE")
        }
    })
    .to_string()
}
