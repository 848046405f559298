use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::SetId;
use crate::model::question::Question;
use crate::model::question_set::QuestionSet;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// User-recoverable input problems. Display text is shown inline as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Name is required to start the test.")]
    MissingCandidateName,

    #[error("Please select a test set.")]
    NoSetSelected,

    #[error("Selected test set not found.")]
    SetNotFound { id: SetId },

    #[error("The selected test set has no questions.")]
    EmptySet { id: SetId },

    #[error("question {index} does not exist (set has {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} does not exist for question {question} (it has {len})")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        len: usize,
    },
}

//
// ─── CANDIDATE ─────────────────────────────────────────────────────────────────
//

/// Who is sitting the exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name: String,
    id: Option<String>,
}

impl Candidate {
    /// Trims both fields; a blank id is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingCandidateName` if the trimmed name is empty.
    pub fn new(name: &str, id: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingCandidateName);
        }
        let id = id.map(str::trim).filter(|id| !id.is_empty()).map(str::to_owned);
        Ok(Self {
            name: name.to_owned(),
            id,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// `Name (id)` when an id is present, else just the name.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{} ({id})", self.name),
            None => self.name.clone(),
        }
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Snapshot of how far along a session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    /// Zero-based index of the question on screen.
    pub position: usize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-progress attempt of one candidate at one set.
///
/// Invariants held for the whole lifetime of the value:
/// - `answers.len() == set.len()`
/// - `current_index < set.len()`
/// - every recorded answer is a valid option index for its question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    set: Arc<QuestionSet>,
    candidate: Candidate,
    answers: Vec<Option<usize>>,
    current_index: usize,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Begin a fresh attempt with every answer unset and the first question current.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySet` if the set has no questions.
    pub fn start(
        set: Arc<QuestionSet>,
        candidate: Candidate,
        started_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if set.is_empty() {
            return Err(ValidationError::EmptySet {
                id: set.id().clone(),
            });
        }
        Ok(Self {
            answers: vec![None; set.len()],
            set,
            candidate,
            current_index: 0,
            started_at,
        })
    }

    /// A new attempt at the same set by the same candidate.
    #[must_use]
    pub fn restart(&self, started_at: DateTime<Utc>) -> Self {
        Self {
            set: Arc::clone(&self.set),
            candidate: self.candidate.clone(),
            answers: vec![None; self.set.len()],
            current_index: 0,
            started_at,
        }
    }

    #[must_use]
    pub fn set(&self) -> &QuestionSet {
        &self.set
    }

    #[must_use]
    pub fn shared_set(&self) -> Arc<QuestionSet> {
        Arc::clone(&self.set)
    }

    #[must_use]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, question_index: usize) -> Option<usize> {
        self.answers.get(question_index).copied().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Always false for a constructed session; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.set.questions()[self.current_index]
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current_index]
    }

    /// Select `option_index` for the question at `question_index`, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::QuestionOutOfRange` or `OptionOutOfRange`
    /// when either index does not exist; the session is left unchanged.
    pub fn record_answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), ValidationError> {
        let question =
            self.set
                .question(question_index)
                .ok_or(ValidationError::QuestionOutOfRange {
                    index: question_index,
                    len: self.set.len(),
                })?;
        if option_index >= question.option_count() {
            return Err(ValidationError::OptionOutOfRange {
                question: question_index,
                option: option_index,
                len: question.option_count(),
            });
        }
        self.answers[question_index] = Some(option_index);
        Ok(())
    }

    /// Record an answer for the question currently on screen.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OptionOutOfRange` for an invalid option.
    pub fn answer_current(&mut self, option_index: usize) -> Result<(), ValidationError> {
        self.record_answer(self.current_index, option_index)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.current_index + 1 < self.set.len()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.current_index > 0
    }

    /// Move to the next question; no-op on the last one.
    pub fn advance(&mut self) {
        if self.can_advance() {
            self.current_index += 1;
        }
    }

    /// Move to the previous question; no-op on the first one.
    pub fn retreat(&mut self) {
        if self.can_retreat() {
            self.current_index -= 1;
        }
    }

    /// Jump straight to a question.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::QuestionOutOfRange` if the index does not exist.
    pub fn jump_to(&mut self, question_index: usize) -> Result<(), ValidationError> {
        if question_index >= self.set.len() {
            return Err(ValidationError::QuestionOutOfRange {
                index: question_index,
                len: self.set.len(),
            });
        }
        self.current_index = question_index;
        Ok(())
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.len(),
            answered,
            unanswered: self.len() - answered,
            position: self.current_index,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
