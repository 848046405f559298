//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{LoadError, ValidationError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ExamController` command handlers.
///
/// None of these are fatal; each maps to an inline message or a disabled action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("Test sets are still loading.")]
    BankLoading,
    #[error("Failed to load sets. Please check questions.json.")]
    BankUnavailable(#[source] LoadError),
    #[error("No test sets available.")]
    NoSetsAvailable,
    #[error("no exam in progress")]
    NoActiveSession,
    #[error("exam already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors emitted while rendering history exports.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
