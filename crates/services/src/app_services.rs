use std::path::{Path, PathBuf};
use std::sync::Arc;

use exam_core::model::{LoadError, QuestionBank};
use storage::bank_file::load_bank_file;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::sessions::{ExamController, ExamWorkflow};

/// Assembles app-facing services around one storage backend and one bank file.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    bank_path: PathBuf,
    history: Arc<HistoryService>,
    workflow: Arc<ExamWorkflow>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        bank_path: impl Into<PathBuf>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, bank_path, clock))
    }

    /// Build services over volatile storage. History is lost on drop.
    #[must_use]
    pub fn in_memory(bank_path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), bank_path, clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, bank_path: impl Into<PathBuf>, clock: Clock) -> Self {
        let history = Arc::new(HistoryService::new(Arc::clone(&storage.slots)));
        let workflow = Arc::new(ExamWorkflow::new(Arc::clone(&history)));
        Self {
            clock,
            bank_path: bank_path.into(),
            history,
            workflow,
        }
    }

    /// Read the configured bank file once.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file is missing, malformed, or invalid.
    pub async fn load_bank(&self) -> Result<QuestionBank, LoadError> {
        load_bank_file(&self.bank_path).await
    }

    /// A controller in the loading state, sharing this instance's clock.
    #[must_use]
    pub fn new_controller(&self) -> ExamController {
        ExamController::new(self.clock)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn bank_path(&self) -> &Path {
        &self.bank_path
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
