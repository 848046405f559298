use exam_core::model::ExamResult;
use services::export::format_percentage;

use crate::vm::time_fmt::{format_datetime, format_optional_datetime};

/// One row of the attempt table; missing values render as `-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub number: usize,
    pub started_at: String,
    pub submitted_at: String,
    pub name: String,
    pub candidate_id: String,
    pub set_title: String,
    pub score: String,
    pub percentage: String,
    pub attempted: usize,
    pub questions: usize,
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

impl HistoryRowVm {
    #[must_use]
    pub fn new(position: usize, result: &ExamResult) -> Self {
        let set_title = if result.set_title().trim().is_empty() {
            result.set_id().as_str()
        } else {
            result.set_title()
        };
        Self {
            number: position + 1,
            started_at: format_optional_datetime(result.started_at()),
            submitted_at: format_datetime(result.submitted_at()),
            name: or_dash(result.candidate_name()),
            candidate_id: or_dash(result.candidate_id().unwrap_or_default()),
            set_title: or_dash(set_title),
            score: format!("{}/{}", result.correct(), result.attempted()),
            percentage: format!("{}%", format_percentage(result.percentage())),
            attempted: result.attempted(),
            questions: result.total_questions(),
        }
    }
}

/// Rows in log order, numbered from 1.
#[must_use]
pub fn map_history_rows(history: &[ExamResult]) -> Vec<HistoryRowVm> {
    history
        .iter()
        .enumerate()
        .map(|(position, result)| HistoryRowVm::new(position, result))
        .collect()
}
