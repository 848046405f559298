use exam_core::model::{QuestionBank, SetId};

/// Marker shown next to a set in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetBadge {
    /// Most recently added set.
    Latest,
    /// Older sets, numbered by their position in the document (1 = oldest).
    Numbered(usize),
}

/// Presentation-agnostic entry of the set picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetListItem {
    pub id: SetId,
    pub title: String,
    pub question_count: usize,
    pub badge: SetBadge,
}

impl SetListItem {
    #[must_use]
    pub fn is_startable(&self) -> bool {
        self.question_count > 0
    }
}

/// Sets in display order: newest (last in the document) first.
#[must_use]
pub fn list_sets(bank: &QuestionBank) -> Vec<SetListItem> {
    let total = bank.len();
    bank.sets()
        .iter()
        .rev()
        .enumerate()
        .map(|(position, set)| SetListItem {
            id: set.id().clone(),
            title: set
                .title()
                .map_or_else(|| format!("Set {}", position + 1), str::to_owned),
            question_count: set.len(),
            badge: if position == 0 {
                SetBadge::Latest
            } else {
                SetBadge::Numbered(total - position)
            },
        })
        .collect()
}
