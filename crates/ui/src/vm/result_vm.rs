use exam_core::model::{ExamResult, QuestionOutcome, QuestionSet};
use services::export::{format_percentage, summary_text};

use crate::vm::time_fmt::{format_datetime, format_optional_datetime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub title: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_line: String,
    pub candidate_line: String,
    pub time_line: String,
    pub feedback: Vec<FeedbackVm>,
    pub share_text: String,
}

impl ResultVm {
    /// `set` supplies option texts; without it answers fall back to their position.
    #[must_use]
    pub fn new(result: &ExamResult, set: Option<&QuestionSet>) -> Self {
        let candidate = match result.candidate_id() {
            Some(id) => format!("{} ({id})", result.candidate_name()),
            None => result.candidate_name().to_owned(),
        };
        let feedback = result
            .details()
            .iter()
            .enumerate()
            .map(|(position, outcome)| feedback_for(position, outcome, set))
            .collect();

        Self {
            score_line: format!(
                "Attempted: {}/{} • Correct: {} ({}%)",
                result.attempted(),
                result.total_questions(),
                result.correct(),
                format_percentage(result.percentage()),
            ),
            candidate_line: format!("Candidate: {candidate} • Test: {}", result.set_title()),
            time_line: format!(
                "Started: {} • Submitted: {}",
                format_optional_datetime(result.started_at()),
                format_datetime(result.submitted_at()),
            ),
            feedback,
            share_text: summary_text(result),
        }
    }
}

/// Confirmation shown after a submit, given how many attempts the log now holds.
#[must_use]
pub fn saved_line(entries: usize) -> Option<String> {
    match entries {
        0 => None,
        1 => Some("Saved to history. 1 attempt on record.".to_owned()),
        n => Some(format!("Saved to history. {n} attempts on record.")),
    }
}

fn option_label(set: Option<&QuestionSet>, position: usize, option: usize) -> String {
    set.and_then(|set| set.question(position))
        .and_then(|question| question.option(option))
        .map_or_else(|| format!("Option {}", option + 1), str::to_owned)
}

fn feedback_for(position: usize, outcome: &QuestionOutcome, set: Option<&QuestionSet>) -> FeedbackVm {
    let your_answer = outcome
        .selected_index
        .map_or_else(|| "Not answered".to_owned(), |i| option_label(set, position, i));
    FeedbackVm {
        title: format!("Q{}. {}", position + 1, outcome.question_text),
        your_answer,
        correct_answer: option_label(set, position, outcome.correct_index),
        correct: outcome.is_correct(),
    }
}
