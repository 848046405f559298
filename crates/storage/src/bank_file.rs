use std::path::Path;

use exam_core::model::{LoadError, QuestionBank};

/// Read and validate a question-bank document from disk.
///
/// This is the one-shot startup load; there is no retry.
///
/// # Errors
///
/// Returns `LoadError::Unreadable` if the file cannot be read, and the
/// parsing/validation variants of `LoadError` for bad content.
pub async fn load_bank_file(path: impl AsRef<Path>) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| LoadError::Unreadable(format!("{}: {err}", path.display())))?;

    let bank = QuestionBank::from_json(&raw)?;
    tracing::info!(path = %path.display(), sets = bank.len(), "question bank loaded");
    Ok(bank)
}
