//! Rule-based question categorisation.
//!
//! Detects the question category from contiguous token and tag subsequences.
//! The labels match the question categories in the sentence-type label set.
//! [`QuestionType::detect_interrogative`] first checks that the sentence opens
//! like a question at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag sequences an interrogative sentence opens with. The first tag must be
/// the sentence's first tag; the rest must follow in order.
const INTERROGATIVE_OPENINGS: [&[&str]; 6] = [
    &["WRB"],
    &["MD"],
    &["WDT"],
    &["WP"],
    &["VBP", "PRP"],
    &["WP", "VBP", "PRP", "VB"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    People,
    Location,
    Occasion,
    Reason,
    Information,
    Choice,
    Quantity,
    Frequency,
    Distance,
    Description,
}

impl QuestionType {
    /// Evaluation order; the first match wins, so multi-word cues precede `how`.
    pub const ALL: [QuestionType; 10] = [
        QuestionType::People,
        QuestionType::Location,
        QuestionType::Occasion,
        QuestionType::Reason,
        QuestionType::Information,
        QuestionType::Choice,
        QuestionType::Quantity,
        QuestionType::Frequency,
        QuestionType::Distance,
        QuestionType::Description,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::People => "PEOPLE",
            QuestionType::Location => "LOCATION",
            QuestionType::Occasion => "OCCASION",
            QuestionType::Reason => "REASON",
            QuestionType::Information => "INFORMATION",
            QuestionType::Choice => "CHOICE",
            QuestionType::Quantity => "QUANTITY",
            QuestionType::Frequency => "FREQUENCY",
            QuestionType::Distance => "DISTANCE",
            QuestionType::Description => "DESCRIPTION",
        }
    }

    fn token_sequence(&self) -> &'static [&'static str] {
        match self {
            QuestionType::People => &["who"],
            QuestionType::Location => &["where"],
            QuestionType::Occasion => &["when"],
            QuestionType::Reason => &["why"],
            QuestionType::Information => &["what"],
            QuestionType::Choice => &["which"],
            QuestionType::Quantity => &["how", "much"],
            QuestionType::Frequency => &["how", "often"],
            QuestionType::Distance => &["how", "far"],
            QuestionType::Description => &["how"],
        }
    }

    fn tag_sequence(&self) -> &'static [&'static str] {
        match self {
            QuestionType::People | QuestionType::Information => &["WP"],
            QuestionType::Choice => &["WDT"],
            QuestionType::Quantity => &["WRB", "JJ"],
            QuestionType::Frequency | QuestionType::Distance => &["WRB", "RB"],
            QuestionType::Location
            | QuestionType::Occasion
            | QuestionType::Reason
            | QuestionType::Description => &["WRB"],
        }
    }

    /// First question type whose tag and token sequences both occur in the
    /// sentence. Tokens are compared lower-cased.
    pub fn evaluate<T: AsRef<str>, U: AsRef<str>>(tokens: &[T], tags: &[U]) -> Option<Self> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.as_ref().to_lowercase()).collect();
        Self::ALL.into_iter().find(|question_type| {
            contains_sublist(tags, question_type.tag_sequence())
                && contains_sublist(&lowered, question_type.token_sequence())
        })
    }

    /// Question type of a sentence that reads as a question: its tags open
    /// with an interrogative sequence and it does not end with `!`.
    pub fn detect_interrogative<T: AsRef<str>, U: AsRef<str>>(
        tokens: &[T],
        tags: &[U],
    ) -> Option<Self> {
        let exclaimed = tokens.last().is_some_and(|t| t.as_ref() == "!");
        let opens_as_question = INTERROGATIVE_OPENINGS
            .iter()
            .any(|opening| has_starting_sequence(tags, opening));
        if opens_as_question && !exclaimed {
            Self::evaluate(tokens, tags)
        } else {
            None
        }
    }
}

/// The first tag matches `sequence[0]`; the first occurrence of each later tag
/// (searched from position 1) lies strictly after the previous one.
fn has_starting_sequence<T: AsRef<str>>(tags: &[T], sequence: &[&str]) -> bool {
    let Some((first, rest)) = sequence.split_first() else {
        return false;
    };
    if tags.first().map(|t| t.as_ref()) != Some(*first) {
        return false;
    }
    let mut last_position = 0;
    for expected in rest {
        match tags
            .iter()
            .skip(1)
            .position(|tag| tag.as_ref() == *expected)
            .map(|p| p + 1)
        {
            Some(position) if position > last_position => last_position = position,
            _ => return false,
        }
    }
    true
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn contains_sublist<T: AsRef<str>>(haystack: &[T], needle: &[&str]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(needle).all(|(a, b)| a.as_ref() == *b))
}
