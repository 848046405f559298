use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Named, durable text slots; the equivalent of a browser's local storage.
///
/// A slot holds one serialized document and is replaced wholesale on write.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Read the current value of a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A slot that was
    /// never written is `Ok(None)`, not an error.
    async fn read_slot(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value of a slot, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn write_slot(&self, name: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the slot does not exist, or other storage errors.
    async fn delete_slot(&self, name: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with arbitrary content, e.g. a corrupted document.
    #[must_use]
    pub fn with_slot(self, name: &str, value: &str) -> Self {
        if let Ok(mut guard) = self.slots.lock() {
            guard.insert(name.to_owned(), value.to_owned());
        }
        self
    }
}

#[async_trait]
impl SlotRepository for InMemoryRepository {
    async fn read_slot(&self, name: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(name).cloned())
    }

    async fn write_slot(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete_slot(&self, name: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(name).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

/// Slot backend behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn SlotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_slots(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_slots(repo: impl SlotRepository + 'static) -> Self {
        Self {
            slots: Arc::new(repo),
        }
    }
}
