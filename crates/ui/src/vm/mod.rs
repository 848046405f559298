mod history_vm;
mod quiz_vm;
mod result_vm;
mod set_card_vm;
mod time_fmt;

pub use history_vm::{HistoryRowVm, map_history_rows};
pub use quiz_vm::{OptionVm, PaletteItemVm, QuestionVm};
pub use result_vm::{FeedbackVm, ResultVm, saved_line};
pub use set_card_vm::{SetCardVm, bank_notice, map_set_cards};
pub use time_fmt::format_datetime;
