//! Tokens and the reduced tag alphabet.
//!
//! Upstream tagging produces Penn Treebank style POS tags. Classification only
//! cares about a handful of grammatical roles, so every raw tag is folded into a
//! [`ReducedTag`] before the feature pipeline runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw POS tag that marks a sentence terminator (`.`, `?`, `!`).
pub const TERMINATOR_RAW_TAG: &str = ".";

/// Reduced tag alphabet used by the feature pipeline.
///
/// `Any` and `Start` are sentinels inserted by the pipeline itself and never
/// come out of [`normalize_tag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReducedTag {
    /// `WRB*`, `WP*`
    Wh,
    /// `VB*`
    Verb,
    /// `JJ`, `RB`
    Modifier,
    /// `.`
    Terminator,
    /// Any other raw tag, kept verbatim.
    Other(String),
    /// Wildcard sentinel, rendered `*`.
    Any,
    /// Sentence-start sentinel, rendered `^`.
    Start,
}

impl ReducedTag {
    /// Symbol used when rendering a token.
    pub fn symbol(&self) -> &str {
        match self {
            ReducedTag::Wh => "WHQ",
            ReducedTag::Verb => "VERB",
            ReducedTag::Modifier => "JT",
            ReducedTag::Terminator => TERMINATOR_RAW_TAG,
            ReducedTag::Other(raw) => raw,
            ReducedTag::Any => "*",
            ReducedTag::Start => "^",
        }
    }

    /// Tags that survive the relevance filter.
    pub fn is_relevant(&self) -> bool {
        matches!(
            self,
            ReducedTag::Wh | ReducedTag::Verb | ReducedTag::Modifier | ReducedTag::Terminator
        )
    }
}

impl fmt::Display for ReducedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fold a raw POS tag into the reduced alphabet. First matching rule wins.
pub fn normalize_tag(raw: &str) -> ReducedTag {
    if raw.starts_with("WRB") || raw.starts_with("WP") {
        ReducedTag::Wh
    } else if raw.starts_with("VB") {
        ReducedTag::Verb
    } else if raw == "JJ" || raw == "RB" {
        ReducedTag::Modifier
    } else if raw == TERMINATOR_RAW_TAG {
        ReducedTag::Terminator
    } else {
        ReducedTag::Other(raw.to_string())
    }
}

/// A (text, tag) pair. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    text: String,
    tag: ReducedTag,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: ReducedTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    /// `("", "*")`
    pub fn any() -> Self {
        Self::new("", ReducedTag::Any)
    }

    /// `("", "^")`
    pub fn start() -> Self {
        Self::new("", ReducedTag::Start)
    }

    /// `("_", "VERB")`: the verb's identity is discarded, only its role is kept.
    pub fn verb() -> Self {
        Self::new("_", ReducedTag::Verb)
    }

    /// Synthetic terminator appended to sentences without one.
    pub fn period() -> Self {
        Self::new(".", ReducedTag::Terminator)
    }

    /// Normalized question mark terminator.
    pub fn question_mark() -> Self {
        Self::new("QM", ReducedTag::Terminator)
    }

    /// Normalized exclamation mark terminator.
    pub fn exclamation_mark() -> Self {
        Self::new("EM", ReducedTag::Terminator)
    }

    /// Normalized declarative terminator.
    pub fn declarative() -> Self {
        Self::new("DT", ReducedTag::Terminator)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> &ReducedTag {
        &self.tag
    }

    pub fn is_any(&self) -> bool {
        self.tag == ReducedTag::Any
    }

    /// Render as `(text/tag)`, or `(tag)` when the text is empty.
    pub fn render(&self) -> String {
        if self.text.is_empty() {
            format!("({})", self.tag)
        } else {
            format!("({}/{})", self.text, self.tag)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
