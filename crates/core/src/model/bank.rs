use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::{QuestionId, SetId};
use crate::model::question::QuestionError;
use crate::model::question_set::{QuestionSet, QuestionSetDraft};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Failure to obtain a usable question bank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question bank could not be read: {0}")]
    Unreadable(String),

    #[error("question bank is not valid JSON: {0}")]
    Malformed(String),

    #[error("question bank lists set {id} more than once")]
    DuplicateSet { id: SetId },

    #[error("set {set}, question {question}: {source}")]
    InvalidQuestion {
        set: SetId,
        question: QuestionId,
        #[source]
        source: QuestionError,
    },
}

//
// ─── DOCUMENT ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
struct BankDocument {
    #[serde(default)]
    sets: Option<Vec<QuestionSetDraft>>,
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Read-only collection of question sets, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    sets: Vec<Arc<QuestionSet>>,
}

impl QuestionBank {
    /// Build a bank from already validated sets.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::DuplicateSet` if two sets share an id.
    pub fn new(sets: Vec<QuestionSet>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(sets.len());
        for set in &sets {
            if !seen.insert(set.id().clone()) {
                return Err(LoadError::DuplicateSet {
                    id: set.id().clone(),
                });
            }
        }
        Ok(Self {
            sets: sets.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse and validate a bank document shaped as `{ "sets": [...] }`.
    ///
    /// A missing or empty `sets` array yields an empty bank rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Malformed` for JSON that does not match the document
    /// shape, and validation variants for entries that break question invariants.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let doc: BankDocument =
            serde_json::from_str(raw).map_err(|err| LoadError::Malformed(err.to_string()))?;

        let drafts = doc.sets.unwrap_or_default();
        let mut sets = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let set_id = draft.id.clone();
            let set = draft
                .validate()
                .map_err(|(question, source)| LoadError::InvalidQuestion {
                    set: set_id,
                    question,
                    source,
                })?;
            sets.push(set);
        }

        Self::new(sets)
    }

    /// Sets in document order (oldest first).
    #[must_use]
    pub fn sets(&self) -> &[Arc<QuestionSet>] {
        &self.sets
    }

    #[must_use]
    pub fn find(&self, id: &SetId) -> Option<&Arc<QuestionSet>> {
        self.sets.iter().find(|set| set.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
