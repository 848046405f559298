//! Reduces a finished session to an [`ExamResult`].

use chrono::{DateTime, Utc};

use crate::model::{ExamResult, QuestionOutcome, Session};

/// Share of `attempted` answers that were correct, in percent, rounded to two decimals.
///
/// Unanswered questions do not count against the candidate. Returns `0.0`
/// when nothing was attempted.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage_of(correct: usize, attempted: usize) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    let ratio = correct as f64 / attempted as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

/// Score `session` as submitted at `submitted_at`.
///
/// Pure: the session is only read, and `details` follows question order.
#[must_use]
pub fn score(session: &Session, submitted_at: DateTime<Utc>) -> ExamResult {
    let set = session.set();
    let details = set
        .questions()
        .iter()
        .zip(session.answers())
        .map(|(question, selected)| QuestionOutcome {
            question_id: question.id().clone(),
            question_text: question.text().to_owned(),
            selected_index: *selected,
            correct_index: question.answer_index(),
        })
        .collect();

    let candidate = session.candidate();
    ExamResult::from_details(
        submitted_at,
        session.started_at(),
        candidate.name().to_owned(),
        candidate.id().map(str::to_owned),
        set.id().clone(),
        set.display_title().to_owned(),
        details,
    )
}
