use chrono::{DateTime, Utc};
use exam_core::model::{ExamResult, QuestionId, QuestionOutcome, ResultError, ResultParts, SetId};
use serde::{Deserialize, Serialize};

/// Persisted shape of a single detail row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
    #[serde(alias = "id")]
    pub question_id: QuestionId,
    #[serde(alias = "question")]
    pub question_text: String,
    #[serde(default)]
    pub selected_index: Option<usize>,
    pub correct_index: usize,
}

/// Persisted JSON shape of an `ExamResult`, one element of the history array.
///
/// Field names are camelCase so exported logs stay readable by other tools.
/// Older entries used `startTime`, `id` and `question`, and may lack `attempted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default, alias = "startTime")]
    pub started_at: Option<DateTime<Utc>>,
    pub candidate_name: String,
    #[serde(default)]
    pub candidate_id: Option<String>,
    pub set_id: SetId,
    pub set_title: String,
    pub total_questions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted: Option<usize>,
    pub correct: usize,
    pub percentage: f64,
    #[serde(default)]
    pub details: Vec<OutcomeRecord>,
}

impl ResultRecord {
    #[must_use]
    pub fn from_result(result: &ExamResult) -> Self {
        Self {
            timestamp: result.submitted_at(),
            started_at: result.started_at(),
            candidate_name: result.candidate_name().to_owned(),
            candidate_id: result.candidate_id().map(str::to_owned),
            set_id: result.set_id().clone(),
            set_title: result.set_title().to_owned(),
            total_questions: result.total_questions(),
            attempted: Some(result.attempted()),
            correct: result.correct(),
            percentage: result.percentage(),
            details: result
                .details()
                .iter()
                .map(|d| OutcomeRecord {
                    question_id: d.question_id.clone(),
                    question_text: d.question_text.clone(),
                    selected_index: d.selected_index,
                    correct_index: d.correct_index,
                })
                .collect(),
        }
    }

    /// Convert the record back into a domain `ExamResult`.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` if the stored aggregates disagree with the stored details.
    pub fn into_result(self) -> Result<ExamResult, ResultError> {
        let details: Vec<QuestionOutcome> = self
            .details
            .into_iter()
            .map(|d| QuestionOutcome {
                question_id: d.question_id,
                question_text: d.question_text,
                selected_index: d.selected_index,
                correct_index: d.correct_index,
            })
            .collect();

        // Entries written before `attempted` existed carry no count. Derive it from the
        // details, since `total_questions` would fail validation for partial attempts.
        let attempted = self
            .attempted
            .unwrap_or_else(|| details.iter().filter(|d| d.is_attempted()).count());

        ExamResult::from_persisted(ResultParts {
            submitted_at: self.timestamp,
            started_at: self.started_at,
            candidate_name: self.candidate_name,
            candidate_id: self.candidate_id.filter(|id| !id.trim().is_empty()),
            set_id: self.set_id,
            set_title: self.set_title,
            total_questions: self.total_questions,
            attempted,
            correct: self.correct,
            percentage: self.percentage,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEB_ENTRY: &str = r#"{
        "timestamp": "2024-05-01T10:05:00.000Z",
        "startTime": "2024-05-01T10:00:00.000Z",
        "candidateName": "Ada",
        "candidateId": "A1",
        "setId": "day-3",
        "setTitle": "Day 3",
        "totalQuestions": 3,
        "attempted": 3,
        "correct": 1,
        "percentage": 33.33333333333333,
        "details": [
            {"id": 1, "question": "A?", "selectedIndex": 0, "correctIndex": 0},
            {"id": 2, "question": "B?", "selectedIndex": 1, "correctIndex": 0},
            {"id": "q3", "question": "C?", "selectedIndex": 2, "correctIndex": 1}
        ]
    }"#;

    const LEGACY: &str = r#"{
        "timestamp": "2024-05-01T10:05:00.000Z",
        "startTime": "2024-05-01T10:00:00.000Z",
        "candidateName": "Ada",
        "candidateId": "",
        "setId": "day-3",
        "setTitle": "Day 3",
        "totalQuestions": 2,
        "correct": 1,
        "percentage": 100,
        "details": [
            {"id": 1, "question": "A?", "selectedIndex": 0, "correctIndex": 0},
            {"id": 2, "question": "B?", "selectedIndex": null, "correctIndex": 1}
        ]
    }"#;

    #[test]
    fn detail_row_accepts_id_and_question() {
        let row: OutcomeRecord = serde_json::from_str(
            r#"{"id": 1, "question": "A?", "selectedIndex": 0, "correctIndex": 0}"#,
        )
        .unwrap();
        assert_eq!(row.question_id, QuestionId::new("1"));
        assert_eq!(row.question_text, "A?");
        assert_eq!(row.selected_index, Some(0));
    }

    #[test]
    fn web_entry_decodes_as_written() {
        let record: ResultRecord = serde_json::from_str(WEB_ENTRY).unwrap();
        assert_eq!(record.attempted, Some(3));

        let result = record.into_result().unwrap();
        assert_eq!(result.candidate_id(), Some("A1"));
        assert_eq!(result.correct(), 1);
        assert_eq!(result.details()[2].question_id, QuestionId::new("q3"));
        assert_eq!(result.details()[1].selected_index, Some(1));
    }

    #[test]
    fn legacy_entry_decodes_with_derived_attempted() {
        let record: ResultRecord = serde_json::from_str(LEGACY).unwrap();
        assert!(record.attempted.is_none());

        let result = record.into_result().unwrap();
        assert_eq!(result.attempted(), 1);
        assert_eq!(result.correct(), 1);
        assert_eq!(result.candidate_id(), None);
        assert!(result.started_at().is_some());
        assert_eq!(result.details()[0].question_text, "A?");
        assert_eq!(result.details()[1].question_id, QuestionId::new("2"));
    }

    #[test]
    fn record_uses_camel_case_field_names() {
        let record: ResultRecord = serde_json::from_str(LEGACY).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("startedAt").is_some());
        assert!(value.get("candidateName").is_some());
        assert!(value["details"][0].get("questionText").is_some());
        assert!(value.get("startTime").is_none());
    }

    #[test]
    fn inconsistent_record_is_rejected() {
        let mut record: ResultRecord = serde_json::from_str(LEGACY).unwrap();
        record.correct = 2;
        assert!(record.into_result().is_err());
    }
}
