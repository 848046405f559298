mod bank;
mod ids;
mod question;
mod question_set;
mod result;
mod session;

pub use ids::{QuestionId, SetId};

pub use bank::{LoadError, QuestionBank};
pub use question::{Question, QuestionDraft, QuestionError};
pub use question_set::{QuestionSet, QuestionSetDraft};
pub use result::{ExamResult, QuestionOutcome, ResultError, ResultParts};
pub use session::{Candidate, Session, SessionProgress, ValidationError};
