use std::sync::Arc;

use exam_core::model::ExamResult;

use super::controller::ExamController;
use crate::error::ExamError;
use crate::history_service::HistoryService;

/// A scored attempt together with the log it was appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub result: ExamResult,
    pub history: Vec<ExamResult>,
}

/// Couples submission with history persistence.
///
/// Scoring happens synchronously on the controller; only the history write
/// awaits, and its failures never turn a submission into an error.
#[derive(Clone)]
pub struct ExamWorkflow {
    history: Arc<HistoryService>,
}

impl ExamWorkflow {
    #[must_use]
    pub fn new(history: Arc<HistoryService>) -> Self {
        Self { history }
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    /// Append an already scored result and return the log as it now reads.
    pub async fn record(&self, result: &ExamResult) -> Vec<ExamResult> {
        self.history.append(result).await;
        self.history.read_all().await
    }

    /// Submit the controller's attempt and record it.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` or `AlreadySubmitted` from the
    /// controller. History problems are not errors.
    pub async fn submit(&self, controller: &mut ExamController) -> Result<Submission, ExamError> {
        let result = controller.on_submit()?;
        let history = self.record(&result).await;
        Ok(Submission { result, history })
    }
}

#[cfg(test)]
mod tests {
    use exam_core::model::{QuestionBank, SetId};
    use exam_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    use super::*;
    use crate::history_service::HISTORY_SLOT;

    const BANK: &str = r#"{"sets": [{"id": "s", "title": "Basics", "questions": [
        {"id": 1, "question": "One?", "options": ["a", "b"], "answerIndex": 0},
        {"id": 2, "question": "Two?", "options": ["a", "b"], "answerIndex": 1}
    ]}]}"#;

    fn started() -> ExamController {
        let mut c = ExamController::with_bank(fixed_clock(), QuestionBank::from_json(BANK).unwrap());
        c.select_set(SetId::new("s"));
        c.start("Ada", None).unwrap();
        c
    }

    #[tokio::test]
    async fn submit_records_and_returns_history() {
        let workflow = ExamWorkflow::new(Arc::new(HistoryService::in_memory()));
        let mut c = started();
        c.on_select_option(0).unwrap();

        let first = workflow.submit(&mut c).await.unwrap();
        assert_eq!(first.result.correct(), 1);
        assert_eq!(first.history, vec![first.result.clone()]);

        c.on_retry().unwrap();
        let second = workflow.submit(&mut c).await.unwrap();
        assert_eq!(second.result.attempted(), 0);
        assert_eq!(second.history.len(), 2);
        assert_eq!(second.history[1], second.result);
    }

    #[tokio::test]
    async fn submit_without_session_writes_nothing() {
        let workflow = ExamWorkflow::new(Arc::new(HistoryService::in_memory()));
        let mut c = ExamController::new(fixed_clock());
        assert_eq!(
            workflow.submit(&mut c).await.unwrap_err(),
            ExamError::NoActiveSession
        );
        assert!(workflow.history().read_all().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_history_does_not_block_submission() {
        let repo = InMemoryRepository::new().with_slot(HISTORY_SLOT, "garbage");
        let workflow = ExamWorkflow::new(Arc::new(HistoryService::new(Arc::new(repo))));
        let mut c = started();

        let submission = workflow.submit(&mut c).await.unwrap();
        assert_eq!(submission.history, vec![submission.result]);
    }
}
