use serde::Deserialize;

use crate::model::ids::{QuestionId, SetId};
use crate::model::question::{Question, QuestionDraft, QuestionError};

/// A set as it appears in a bank document, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionSetDraft {
    pub id: SetId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

impl QuestionSetDraft {
    /// Validate every question in order.
    ///
    /// # Errors
    ///
    /// Returns the id of the first offending question together with its error.
    pub fn validate(self) -> Result<QuestionSet, (QuestionId, QuestionError)> {
        let mut questions = Vec::with_capacity(self.questions.len());
        for draft in self.questions {
            let id = draft.id.clone();
            questions.push(draft.validate().map_err(|err| (id, err))?);
        }

        Ok(QuestionSet {
            id: self.id,
            title: self
                .title
                .map(|t| t.trim().to_owned())
                .filter(|t| !t.is_empty()),
            questions,
        })
    }
}

/// A named, ordered collection of questions making up one exam.
///
/// A set may be empty; it is listed but cannot be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    id: SetId,
    title: Option<String>,
    questions: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn new(id: SetId, title: Option<String>, questions: Vec<Question>) -> Self {
        Self {
            id,
            title,
            questions,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SetId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title for headers and results; falls back to the set id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.id.as_str())
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
