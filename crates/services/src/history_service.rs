use std::sync::Arc;

use exam_core::model::ExamResult;
use serde_json::Value;
use storage::record::ResultRecord;
use storage::repository::{InMemoryRepository, SlotRepository, StorageError};

use crate::error::ExportError;
use crate::export::history_json;

/// Slot holding the serialized attempt log.
pub const HISTORY_SLOT: &str = "examResults";

/// Append-only log of submitted results, stored as one JSON array in a named slot.
///
/// Storage problems never reach the caller: a corrupt or unreadable slot reads
/// as an empty log and failed writes are logged and dropped. Losing history is
/// preferable to blocking a submission.
#[derive(Clone)]
pub struct HistoryService {
    slots: Arc<dyn SlotRepository>,
    slot: String,
}

impl HistoryService {
    #[must_use]
    pub fn new(slots: Arc<dyn SlotRepository>) -> Self {
        Self {
            slots,
            slot: HISTORY_SLOT.to_owned(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }

    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Raw entries as stored. Anything other than a JSON array counts as empty.
    async fn load_entries(&self) -> Vec<Value> {
        let raw = match self.slots.read_slot(&self.slot).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "history unreadable; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "history corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    async fn store_entries(&self, entries: &[Value]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.slots.write_slot(&self.slot, &raw).await
    }

    /// Append one result to the log.
    ///
    /// Entries this version cannot decode are carried over untouched.
    pub async fn append(&self, result: &ExamResult) {
        let record = ResultRecord::from_result(result);
        let value = match serde_json::to_value(&record) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "could not encode result; not recorded");
                return;
            }
        };

        let mut entries = self.load_entries().await;
        entries.push(value);
        if let Err(err) = self.store_entries(&entries).await {
            tracing::warn!(slot = %self.slot, error = %err, "history write failed; result not recorded");
            return;
        }
        tracing::debug!(slot = %self.slot, entries = entries.len(), "result appended to history");
    }

    /// Every decodable result, oldest first.
    pub async fn read_all(&self) -> Vec<ExamResult> {
        self.load_entries()
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(position, value)| {
                let decoded = serde_json::from_value::<ResultRecord>(value)
                    .map_err(|err| err.to_string())
                    .and_then(|record| record.into_result().map_err(|err| err.to_string()));
                match decoded {
                    Ok(result) => Some(result),
                    Err(reason) => {
                        tracing::warn!(position, %reason, "skipping unreadable history entry");
                        None
                    }
                }
            })
            .collect()
    }

    /// Most recent result, if any.
    pub async fn latest(&self) -> Option<ExamResult> {
        self.read_all().await.pop()
    }

    /// Drop the whole log.
    pub async fn clear(&self) {
        match self.slots.delete_slot(&self.slot).await {
            Ok(()) | Err(StorageError::NotFound) => {}
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "history clear failed");
            }
        }
    }

    /// Full log as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Json` if serialization fails.
    pub async fn export_json(&self) -> Result<String, ExportError> {
        history_json(&self.read_all().await)
    }
}
