//! Nominal decision tree over feature symbols.

use companion_domain::{DomainError, LabelDistribution, NominalAttribute};
use serde::Deserialize;
use std::collections::HashMap;

/// One node of the tree.
///
/// ```json
/// {"split": 1, "children": {"(what/WHQ)": {"leaf": [0.1, 0.9]}}, "default": [0.5, 0.5]}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: Vec<f64>,
    },
    Split {
        split: usize,
        children: HashMap<String, TreeNode>,
        default: Vec<f64>,
    },
}

#[derive(Debug, Deserialize)]
struct DecisionTreeFile {
    labels: Vec<String>,
    attributes: Vec<NominalAttribute>,
    root: TreeNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "DecisionTreeFile")]
pub struct DecisionTreeModel {
    labels: Vec<String>,
    attributes: Vec<NominalAttribute>,
    root: TreeNode,
}

impl TryFrom<DecisionTreeFile> for DecisionTreeModel {
    type Error = String;

    fn try_from(file: DecisionTreeFile) -> Result<Self, Self::Error> {
        if file.labels.is_empty() {
            return Err("decision tree has no labels".to_string());
        }
        check_node(&file.root, file.labels.len(), &file.attributes)?;
        Ok(Self {
            labels: file.labels,
            attributes: file.attributes,
            root: file.root,
        })
    }
}

fn check_leaf(values: &[f64], labels: usize) -> Result<(), String> {
    if values.len() != labels {
        return Err(format!(
            "leaf has {} values for {} labels",
            values.len(),
            labels
        ));
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(format!("leaf {values:?} has a negative or non-finite value"));
    }
    Ok(())
}

fn check_node(node: &TreeNode, labels: usize, attributes: &[NominalAttribute]) -> Result<(), String> {
    match node {
        TreeNode::Leaf { leaf } => check_leaf(leaf, labels),
        TreeNode::Split {
            split,
            children,
            default,
        } => {
            let attribute = attributes
                .get(*split)
                .ok_or_else(|| format!("split on attribute {split} of {}", attributes.len()))?;
            check_leaf(default, labels)?;
            for (value, child) in children {
                if attribute.index_of(value).is_none() {
                    return Err(format!(
                        "'{value}' is not a value of attribute '{}'",
                        attribute.name()
                    ));
                }
                check_node(child, labels, attributes)?;
            }
            Ok(())
        }
    }
}

impl DecisionTreeModel {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn attributes(&self) -> &[NominalAttribute] {
        &self.attributes
    }

    pub fn cardinalities(&self) -> Vec<usize> {
        self.attributes.iter().map(NominalAttribute::cardinality).collect()
    }

    /// Walk the tree for one instance and return the normalized leaf, in label order.
    pub fn posterior<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<f64>, DomainError> {
        if values.len() != self.attributes.len() {
            return Err(DomainError::FeatureWidth {
                expected: self.attributes.len(),
                actual: values.len(),
            });
        }

        let mut node = &self.root;
        let leaf = loop {
            match node {
                TreeNode::Leaf { leaf } => break leaf,
                TreeNode::Split {
                    split,
                    children,
                    default,
                } => match children.get(values[*split].as_ref()) {
                    Some(child) => node = child,
                    None => break default,
                },
            }
        };

        let mut posterior = leaf.clone();
        super::normalize(&mut posterior);
        Ok(posterior)
    }

    pub fn distribution<S: AsRef<str>>(
        &self,
        labels: &[String],
        values: &[S],
    ) -> Result<LabelDistribution, DomainError> {
        LabelDistribution::from_pairs(labels, &self.posterior(values)?)
    }
}
