use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{QuestionId, SetId};
use crate::scoring::percentage_of;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("submitted before the attempt started")]
    InvalidTimeRange,

    #[error("total questions ({total}) does not match detail rows ({rows})")]
    TotalMismatch { total: usize, rows: usize },

    #[error("attempted ({recorded}) does not match answered details ({actual})")]
    AttemptedMismatch { recorded: usize, actual: usize },

    #[error("correct ({recorded}) does not match correct details ({actual})")]
    CorrectMismatch { recorded: usize, actual: usize },

    #[error("percentage {recorded} does not match {expected}")]
    PercentageMismatch { recorded: f64, expected: f64 },
}

/// Per-question line of a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected_index: Option<usize>,
    pub correct_index: usize,
}

impl QuestionOutcome {
    #[must_use]
    pub fn is_attempted(&self) -> bool {
        self.selected_index.is_some()
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected_index == Some(self.correct_index)
    }
}

/// Everything needed to rebuild a result from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultParts {
    pub submitted_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub candidate_name: String,
    pub candidate_id: Option<String>,
    pub set_id: SetId,
    pub set_title: String,
    pub total_questions: usize,
    pub attempted: usize,
    pub correct: usize,
    pub percentage: f64,
    pub details: Vec<QuestionOutcome>,
}

/// Immutable, scored outcome of one submitted session.
///
/// `percentage` is relative to attempted questions, not the total.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamResult {
    submitted_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    candidate_name: String,
    candidate_id: Option<String>,
    set_id: SetId,
    set_title: String,
    total_questions: usize,
    attempted: usize,
    correct: usize,
    percentage: f64,
    details: Vec<QuestionOutcome>,
}

impl ExamResult {
    /// Tallies `details` into a result. Counts and percentage are derived, never supplied.
    #[must_use]
    pub(crate) fn from_details(
        submitted_at: DateTime<Utc>,
        started_at: DateTime<Utc>,
        candidate_name: String,
        candidate_id: Option<String>,
        set_id: SetId,
        set_title: String,
        details: Vec<QuestionOutcome>,
    ) -> Self {
        let attempted = details.iter().filter(|d| d.is_attempted()).count();
        let correct = details.iter().filter(|d| d.is_correct()).count();
        Self {
            submitted_at,
            started_at: Some(started_at),
            candidate_name,
            candidate_id,
            set_id,
            set_title,
            total_questions: details.len(),
            attempted,
            correct,
            percentage: percentage_of(correct, attempted),
            details,
        }
    }

    /// Rehydrate a result from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` if the stored counts, percentage, or timestamps
    /// disagree with the stored details.
    pub fn from_persisted(parts: ResultParts) -> Result<Self, ResultError> {
        if parts
            .started_at
            .is_some_and(|started_at| parts.submitted_at < started_at)
        {
            return Err(ResultError::InvalidTimeRange);
        }
        if parts.total_questions != parts.details.len() {
            return Err(ResultError::TotalMismatch {
                total: parts.total_questions,
                rows: parts.details.len(),
            });
        }
        let attempted = parts.details.iter().filter(|d| d.is_attempted()).count();
        if parts.attempted != attempted {
            return Err(ResultError::AttemptedMismatch {
                recorded: parts.attempted,
                actual: attempted,
            });
        }
        let correct = parts.details.iter().filter(|d| d.is_correct()).count();
        if parts.correct != correct {
            return Err(ResultError::CorrectMismatch {
                recorded: parts.correct,
                actual: correct,
            });
        }
        let expected = percentage_of(correct, attempted);
        if (parts.percentage - expected).abs() > 0.01 {
            return Err(ResultError::PercentageMismatch {
                recorded: parts.percentage,
                expected,
            });
        }

        Ok(Self {
            submitted_at: parts.submitted_at,
            started_at: parts.started_at,
            candidate_name: parts.candidate_name,
            candidate_id: parts.candidate_id,
            set_id: parts.set_id,
            set_title: parts.set_title,
            total_questions: parts.total_questions,
            attempted,
            correct,
            percentage: expected,
            details: parts.details,
        })
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Missing on records written before start times were tracked.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn candidate_name(&self) -> &str {
        &self.candidate_name
    }

    #[must_use]
    pub fn candidate_id(&self) -> Option<&str> {
        self.candidate_id.as_deref()
    }

    #[must_use]
    pub fn set_id(&self) -> &SetId {
        &self.set_id
    }

    #[must_use]
    pub fn set_title(&self) -> &str {
        &self.set_title
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn details(&self) -> &[QuestionOutcome] {
        &self.details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn outcome(id: &str, selected: Option<usize>, correct: usize) -> QuestionOutcome {
        QuestionOutcome {
            question_id: QuestionId::new(id),
            question_text: format!("text {id}"),
            selected_index: selected,
            correct_index: correct,
        }
    }

    fn parts() -> ResultParts {
        ResultParts {
            submitted_at: fixed_now(),
            started_at: Some(fixed_now()),
            candidate_name: "Ada".into(),
            candidate_id: None,
            set_id: SetId::new("s"),
            set_title: "Set".into(),
            total_questions: 3,
            attempted: 2,
            correct: 1,
            percentage: 50.0,
            details: vec![
                outcome("1", Some(0), 0),
                outcome("2", Some(2), 1),
                outcome("3", None, 2),
            ],
        }
    }

    #[test]
    fn persisted_result_round_trips_when_consistent() {
        let result = ExamResult::from_persisted(parts()).unwrap();
        assert_eq!(result.attempted(), 2);
        assert_eq!(result.correct(), 1);
        assert!((result.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn persisted_counts_must_match_details() {
        let mut p = parts();
        p.attempted = 3;
        assert_eq!(
            ExamResult::from_persisted(p).unwrap_err(),
            ResultError::AttemptedMismatch {
                recorded: 3,
                actual: 2
            }
        );

        let mut p = parts();
        p.correct = 2;
        assert!(matches!(
            ExamResult::from_persisted(p),
            Err(ResultError::CorrectMismatch { .. })
        ));

        let mut p = parts();
        p.total_questions = 4;
        assert!(matches!(
            ExamResult::from_persisted(p),
            Err(ResultError::TotalMismatch { .. })
        ));

        let mut p = parts();
        p.percentage = 75.0;
        assert!(matches!(
            ExamResult::from_persisted(p),
            Err(ResultError::PercentageMismatch { .. })
        ));
    }

    #[test]
    fn persisted_times_must_be_ordered() {
        let mut p = parts();
        p.started_at = Some(fixed_now() + chrono::Duration::seconds(1));
        assert_eq!(
            ExamResult::from_persisted(p).unwrap_err(),
            ResultError::InvalidTimeRange
        );
    }

    #[test]
    fn missing_start_time_is_accepted() {
        let mut p = parts();
        p.started_at = None;
        let result = ExamResult::from_persisted(p).unwrap();
        assert_eq!(result.started_at(), None);
    }
}
