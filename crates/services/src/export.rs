//! Plain-text and JSON renderings of results for sharing outside the app.

use exam_core::model::ExamResult;
use storage::record::ResultRecord;

use crate::error::ExportError;

/// `50` for whole numbers, otherwise up to two decimals without trailing zeros.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

/// Short, message-friendly summary of a single attempt.
#[must_use]
pub fn summary_text(result: &ExamResult) -> String {
    format!(
        "Practice Exam Result\n\
         Name: {}\n\
         Test: {}\n\
         Score: {}/{}\n\
         Percentage: {}%\n\
         Date: {}",
        result.candidate_name(),
        result.set_title(),
        result.correct(),
        result.attempted(),
        format_percentage(result.percentage()),
        result.submitted_at().format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Summary of the most recent entry in `history`.
#[must_use]
pub fn latest_summary(history: &[ExamResult]) -> Option<String> {
    history.last().map(summary_text)
}

/// The whole log in its persisted JSON shape, pretty-printed.
///
/// # Errors
///
/// Returns `ExportError::Json` if serialization fails.
pub fn history_json(history: &[ExamResult]) -> Result<String, ExportError> {
    let records: Vec<ResultRecord> = history.iter().map(ResultRecord::from_result).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exam_core::model::{Candidate, Question, QuestionId, QuestionSet, Session, SetId};
    use exam_core::scoring::score;
    use exam_core::time::fixed_now;

    use super::*;

    fn one_of_three() -> ExamResult {
        let questions = (0..3)
            .map(|i| {
                Question::new(
                    QuestionId::new(i.to_string()),
                    "Q",
                    vec!["a".into(), "b".into()],
                    0,
                )
                .unwrap()
            })
            .collect();
        let set = Arc::new(QuestionSet::new(
            SetId::new("net"),
            Some("Networking".into()),
            questions,
        ));
        let mut session =
            Session::start(set, Candidate::new("Ada", None).unwrap(), fixed_now()).unwrap();
        session.record_answer(0, 0).unwrap();
        session.record_answer(1, 1).unwrap();
        session.record_answer(2, 1).unwrap();
        score(&session, fixed_now())
    }

    #[test]
    fn percentages_drop_needless_decimals() {
        assert_eq!(format_percentage(50.0), "50");
        assert_eq!(format_percentage(100.0), "100");
        assert_eq!(format_percentage(0.0), "0");
        assert_eq!(format_percentage(12.5), "12.5");
        assert_eq!(format_percentage(33.33), "33.33");
    }

    #[test]
    fn summary_lists_the_key_facts() {
        let text = summary_text(&one_of_three());
        assert_eq!(
            text,
            "Practice Exam Result\n\
             Name: Ada\n\
             Test: Networking\n\
             Score: 1/3\n\
             Percentage: 33.33%\n\
             Date: 2023-11-14 22:13 UTC"
        );
    }

    #[test]
    fn latest_summary_uses_last_entry() {
        assert!(latest_summary(&[]).is_none());
        let text = latest_summary(&[one_of_three()]).unwrap();
        assert!(text.starts_with("Practice Exam Result"));
    }

    #[test]
    fn history_json_is_an_array_of_records() {
        let json = history_json(&[one_of_three()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["setTitle"], "Networking");
        assert_eq!(value[0]["attempted"], 3);
        assert_eq!(value[0]["details"].as_array().unwrap().len(), 3);
    }
}
