//! Upstream-annotated text: tokens, reduced tags and sentences.

pub mod sentence;
pub mod token;
