#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod error;
pub mod export;
pub mod history_service;
pub mod sessions;

pub use exam_core::Clock;
pub use storage::bank_file::load_bank_file;

pub use app_services::AppServices;
pub use catalog::{SetBadge, SetListItem, list_sets};
pub use error::{AppServicesError, ExamError, ExportError};
pub use history_service::{HISTORY_SLOT, HistoryService};
pub use sessions::{BankState, ExamController, ExamPhase, ExamWorkflow, Submission};
