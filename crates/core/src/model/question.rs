use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("answer index {index} is outside the {len} available options")]
    AnswerOutOfRange { index: i64, len: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// A question exactly as it appears in a bank document, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer_index: i64,
}

impl QuestionDraft {
    /// Check the draft against the question invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no options, or
    /// `answer_index` does not point at one of the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        let answer_index = usize::try_from(self.answer_index)
            .ok()
            .filter(|idx| *idx < self.options.len())
            .ok_or(QuestionError::AnswerOutOfRange {
                index: self.answer_index,
                len: self.options.len(),
            })?;

        Ok(Question {
            id: self.id,
            text: self.question,
            options: self.options,
            answer_index,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Always satisfies `answer_index < options.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    answer_index: usize,
}

impl Question {
    /// Build a question directly from parts.
    ///
    /// # Errors
    ///
    /// Same rules as [`QuestionDraft::validate`].
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        answer_index: usize,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            id,
            question: text.into(),
            options,
            answer_index: i64::try_from(answer_index).unwrap_or(i64::MAX),
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.answer_index
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.answer_index
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
