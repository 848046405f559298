use std::path::PathBuf;
use std::sync::Arc;

use exam_core::model::{ExamResult, LoadError, QuestionBank};
use services::{Clock, ExamController, ExamWorkflow, HistoryService, load_bank_file};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn bank_path(&self) -> PathBuf;

    fn history(&self) -> Arc<HistoryService>;
    fn workflow(&self) -> Arc<ExamWorkflow>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    bank_path: PathBuf,

    history: Arc<HistoryService>,
    workflow: Arc<ExamWorkflow>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            bank_path: app.bank_path(),
            history: app.history(),
            workflow: app.workflow(),
        }
    }

    /// A fresh controller waiting for the bank.
    #[must_use]
    pub fn new_controller(&self) -> ExamController {
        ExamController::new(self.clock)
    }

    /// # Errors
    ///
    /// Returns `LoadError` if the bank file cannot be read or validated.
    pub async fn load_bank(&self) -> Result<QuestionBank, LoadError> {
        load_bank_file(&self.bank_path).await
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn workflow(&self) -> Arc<ExamWorkflow> {
        Arc::clone(&self.workflow)
    }
}

/// The history log as read back by the most recent submit in this run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecentAttempts(pub Vec<ExamResult>);

impl RecentAttempts {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
