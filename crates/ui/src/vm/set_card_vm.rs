use exam_core::model::SetId;
use services::{BankState, ExamError, SetBadge, SetListItem};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetCardVm {
    pub id: SetId,
    pub title: String,
    pub badge: String,
    pub question_count: String,
    pub startable: bool,
    pub selected: bool,
}

impl SetCardVm {
    #[must_use]
    pub fn from_item(item: &SetListItem, selected: Option<&SetId>) -> Self {
        let badge = match item.badge {
            SetBadge::Latest => "Latest".to_owned(),
            SetBadge::Numbered(n) => format!("Set #{n}"),
        };
        let question_count = match item.question_count {
            1 => "1 question".to_owned(),
            n => format!("{n} questions"),
        };
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            badge,
            question_count,
            startable: item.is_startable(),
            selected: selected == Some(&item.id),
        }
    }
}

#[must_use]
pub fn map_set_cards(items: &[SetListItem], selected: Option<&SetId>) -> Vec<SetCardVm> {
    items
        .iter()
        .map(|item| SetCardVm::from_item(item, selected))
        .collect()
}

/// Message shown in place of the set list when there is nothing to pick from.
#[must_use]
pub fn bank_notice(state: &BankState) -> Option<String> {
    match state {
        BankState::Loading => Some(ExamError::BankLoading.to_string()),
        BankState::Failed(err) => Some(ExamError::BankUnavailable(err.clone()).to_string()),
        BankState::Ready(bank) if bank.is_empty() => Some(ExamError::NoSetsAvailable.to_string()),
        BankState::Ready(_) => None,
    }
}
