mod controller;
mod workflow;

// Public API of the exam session subsystem.
pub use controller::{BankState, ExamController, ExamPhase};
pub use workflow::{ExamWorkflow, Submission};
