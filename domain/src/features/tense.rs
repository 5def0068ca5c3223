//! Tense feature bag.
//!
//! Reduces a sentence to the sequence of its verb-like tokens (verbs, the
//! modals `will`/`would`, and `to`), each rendered with just enough detail to
//! tell tenses apart. The bag is a single whitespace-joined string suitable for
//! a bag-of-words model.

use crate::core::error::DomainError;
use crate::text::sentence::Sentence;

/// Contraction expansions, applied in order.
const CONTRACTIONS: [(&str, &str); 7] = [
    ("n't", "not"),
    ("'re", "are"),
    ("'m", "am"),
    ("'ll", "will"),
    ("'ve", "have"),
    ("'d", "would"),
    ("'s", "is"),
];

struct WordInfo<'a> {
    token: String,
    tag: &'a str,
    lemma: Option<&'a str>,
}

impl WordInfo<'_> {
    fn is_verb_like(&self) -> bool {
        self.tag.starts_with('V') || self.is_future_modal() || self.tag == "TO"
    }

    fn is_future_modal(&self) -> bool {
        self.tag == "MD" && (self.token == "will" || self.token == "would")
    }

    fn render(&self, index: usize) -> String {
        let tag = self.tag;
        match (tag, self.lemma) {
            ("VBP" | "VBZ" | "VBD" | "VBN", Some("be")) => format!("{tag}(be,{index})"),
            ("VBP" | "VBZ" | "VBD" | "VB", Some("have")) => format!("{tag}(have,{index})"),
            ("VBG", _) if self.token == "going" => format!("{tag}(going,{index})"),
            ("MD", _) if self.is_future_modal() => format!("{tag}({},{index})", self.token),
            ("VBP" | "VBG" | "VBZ", _) => format!("{tag}({index})"),
            _ => tag.to_string(),
        }
    }
}

/// Expand common English contractions in a lower-cased token.
pub fn expand_contractions(token: &str) -> String {
    if token == "wo" {
        return "will".to_string();
    }
    CONTRACTIONS
        .iter()
        .fold(token.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Build the tense bag for one sentence.
pub fn tense_bag(sentence: &Sentence) -> Result<String, DomainError> {
    sentence.validate()?;

    let bag: Vec<String> = sentence
        .tokens
        .iter()
        .zip(&sentence.pos_tags)
        .enumerate()
        .map(|(i, (token, tag))| WordInfo {
            token: expand_contractions(&token.to_lowercase()),
            tag: tag.as_str(),
            lemma: sentence.lemma(i),
        })
        .filter(|word| word.is_verb_like())
        .enumerate()
        .map(|(index, word)| word.render(index))
        .collect();

    Ok(bag.join(" "))
}
