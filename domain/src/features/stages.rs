//! The five rewriting stages of the feature pipeline.
//!
//! Every stage is a pure `Vec<Token> -> Vec<Token>` function so that it can be
//! tested on its own and composed in any order by [`super::pipeline`].

use super::sequence::FEATURE_WIDTH;
use crate::text::token::{ReducedTag, Token};

/// Modifiers that carry quantity, frequency or distance cues.
pub const CUE_MODIFIERS: [&str; 4] = ["much", "often", "many", "far"];

/// Order in which [`deduplicate`] promotes first occurrences.
const DEDUP_PRIORITY: [ReducedTag; 4] = [
    ReducedTag::Wh,
    ReducedTag::Verb,
    ReducedTag::Modifier,
    ReducedTag::Terminator,
];

/// Stage 1: keep only the grammatical shape.
///
/// Irrelevant tokens become ANY, verbs lose their identity, and modifiers
/// survive only when they are one of [`CUE_MODIFIERS`].
pub fn relevance_filter(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| {
            let keep = match token.tag() {
                ReducedTag::Verb => return Token::verb(),
                ReducedTag::Modifier => is_cue_modifier(token.text()),
                tag => tag.is_relevant(),
            };
            if keep { token } else { Token::any() }
        })
        .collect()
}

fn is_cue_modifier(text: &str) -> bool {
    CUE_MODIFIERS
        .iter()
        .any(|cue| text.eq_ignore_ascii_case(cue))
}

/// Stage 2: only the earliest marker of each relevant tag survives, then
/// adjacent duplicates collapse into one.
pub fn deduplicate(mut tokens: Vec<Token>) -> Vec<Token> {
    for tag in &DEDUP_PRIORITY {
        if let Some(index) = tokens.iter().position(|token| token.tag() == tag) {
            let first = tokens[index].clone();
            tokens.retain(|token| token.tag() != tag);
            // every removed token sat at or after `index`
            tokens.insert(index, first);
        }
    }
    tokens.dedup();
    tokens
}

/// Stage 3: prepend START for WH/verb openings, ANY for anything else that is
/// not already ANY.
pub fn mark_start(mut tokens: Vec<Token>) -> Vec<Token> {
    let prefix = match tokens.first().map(Token::tag) {
        Some(ReducedTag::Wh | ReducedTag::Verb) => Some(Token::start()),
        Some(ReducedTag::Any) | None => None,
        Some(_) => Some(Token::any()),
    };
    if let Some(prefix) = prefix {
        tokens.insert(0, prefix);
    }
    tokens
}

/// Stage 4: insert ANY before the last element until the sequence is
/// [`FEATURE_WIDTH`] long.
pub fn pad(mut tokens: Vec<Token>) -> Vec<Token> {
    while tokens.len() < FEATURE_WIDTH {
        let at = tokens.len().saturating_sub(1);
        tokens.insert(at, Token::any());
    }
    tokens
}

/// Stage 5: rewrite the final terminator to QM, EM or DT.
pub fn normalize_terminator(mut tokens: Vec<Token>) -> Vec<Token> {
    if let Some(last) = tokens.last_mut() {
        let replacement = match last.text() {
            "?" => Some(Token::question_mark()),
            "!" => Some(Token::exclamation_mark()),
            "." => Some(Token::declarative()),
            "" if *last.tag() == ReducedTag::Terminator => Some(Token::declarative()),
            _ => None,
        };
        if let Some(replacement) = replacement {
            *last = replacement;
        }
    }
    tokens
}
