use exam_core::Clock;
use exam_core::model::{
    Candidate, ExamResult, LoadError, QuestionBank, Session, SetId, ValidationError,
};
use exam_core::scoring::score;

use crate::catalog::{SetListItem, list_sets};
use crate::error::ExamError;

/// Where the one-shot question bank load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankState {
    Loading,
    Ready(QuestionBank),
    Failed(LoadError),
}

/// What the candidate is currently looking at.
#[derive(Debug, Clone, PartialEq)]
pub enum ExamPhase {
    /// Picking a set and entering a name.
    Setup,
    InProgress(Session),
    /// The attempt is kept so it can be retried or reviewed.
    Submitted {
        session: Session,
        result: ExamResult,
    },
}

/// Owns all mutable exam state for one app instance.
///
/// Every user action is a method returning the updated session (or result) or
/// a typed error; rendering reads the controller and never mutates it directly.
/// Starting or retrying fully replaces whatever attempt came before.
#[derive(Debug, Clone)]
pub struct ExamController {
    clock: Clock,
    bank: BankState,
    selected: Option<SetId>,
    phase: ExamPhase,
}

impl ExamController {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            bank: BankState::Loading,
            selected: None,
            phase: ExamPhase::Setup,
        }
    }

    #[must_use]
    pub fn with_bank(clock: Clock, bank: QuestionBank) -> Self {
        let mut controller = Self::new(clock);
        controller.on_bank_loaded(Ok(bank));
        controller
    }

    /// Record the outcome of the startup load.
    pub fn on_bank_loaded(&mut self, loaded: Result<QuestionBank, LoadError>) {
        self.bank = match loaded {
            Ok(bank) => {
                if bank.is_empty() {
                    tracing::warn!("question bank has no sets");
                }
                BankState::Ready(bank)
            }
            Err(err) => {
                tracing::error!(error = %err, "question bank failed to load");
                BankState::Failed(err)
            }
        };
    }

    #[must_use]
    pub fn bank_state(&self) -> &BankState {
        &self.bank
    }

    #[must_use]
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Sets in display order; empty until the bank is ready.
    #[must_use]
    pub fn catalog(&self) -> Vec<SetListItem> {
        match &self.bank {
            BankState::Ready(bank) => list_sets(bank),
            BankState::Loading | BankState::Failed(_) => Vec::new(),
        }
    }

    /// Remember which set the candidate picked. Checked against the bank on start.
    pub fn select_set(&mut self, id: SetId) {
        self.selected = Some(id);
    }

    #[must_use]
    pub fn selected_set(&self) -> Option<&SetId> {
        self.selected.as_ref()
    }

    /// Whether the start action should be enabled for the typed name.
    #[must_use]
    pub fn can_start(&self, candidate_name: &str) -> bool {
        let has_sets = matches!(&self.bank, BankState::Ready(bank) if !bank.is_empty());
        has_sets && self.selected.is_some() && !candidate_name.trim().is_empty()
    }

    fn ready_bank(&self) -> Result<&QuestionBank, ExamError> {
        match &self.bank {
            BankState::Loading => Err(ExamError::BankLoading),
            BankState::Failed(err) => Err(ExamError::BankUnavailable(err.clone())),
            BankState::Ready(bank) if bank.is_empty() => Err(ExamError::NoSetsAvailable),
            BankState::Ready(bank) => Ok(bank),
        }
    }

    /// Begin an attempt at the selected set.
    ///
    /// # Errors
    ///
    /// Returns `ExamError` if the bank is not usable, or a `ValidationError`
    /// (checked in order: name, selection, existence, non-empty set).
    pub fn start(
        &mut self,
        candidate_name: &str,
        candidate_id: Option<&str>,
    ) -> Result<&Session, ExamError> {
        let bank = self.ready_bank()?;
        let candidate = Candidate::new(candidate_name, candidate_id)?;
        let set_id = self.selected.as_ref().ok_or(ValidationError::NoSetSelected)?;
        let set = bank
            .find(set_id)
            .ok_or_else(|| ValidationError::SetNotFound { id: set_id.clone() })?;
        let session = Session::start(std::sync::Arc::clone(set), candidate, self.clock.now())?;

        tracing::info!(
            set = %session.set().id(),
            questions = session.len(),
            "exam started"
        );
        self.phase = ExamPhase::InProgress(session);
        self.session().ok_or(ExamError::NoActiveSession)
    }

    #[must_use]
    pub fn phase(&self) -> &ExamPhase {
        &self.phase
    }

    /// The attempt in progress, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            ExamPhase::InProgress(session) => Some(session),
            ExamPhase::Setup | ExamPhase::Submitted { .. } => None,
        }
    }

    /// The result of the last submission, while it is on screen.
    #[must_use]
    pub fn result(&self) -> Option<&ExamResult> {
        match &self.phase {
            ExamPhase::Submitted { result, .. } => Some(result),
            ExamPhase::Setup | ExamPhase::InProgress(_) => None,
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session, ExamError> {
        match &mut self.phase {
            ExamPhase::InProgress(session) => Ok(session),
            ExamPhase::Submitted { .. } => Err(ExamError::AlreadySubmitted),
            ExamPhase::Setup => Err(ExamError::NoActiveSession),
        }
    }

    /// Choose an option for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` / `AlreadySubmitted`, or a
    /// `ValidationError` for an option that does not exist.
    pub fn on_select_option(&mut self, option_index: usize) -> Result<&Session, ExamError> {
        let session = self.session_mut()?;
        session.answer_current(option_index)?;
        Ok(session)
    }

    /// Choose an option for any question by index.
    ///
    /// # Errors
    ///
    /// Same as [`Self::on_select_option`], plus `QuestionOutOfRange`.
    pub fn on_record_answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<&Session, ExamError> {
        let session = self.session_mut()?;
        session.record_answer(question_index, option_index)?;
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` / `AlreadySubmitted`.
    pub fn on_next(&mut self) -> Result<&Session, ExamError> {
        let session = self.session_mut()?;
        session.advance();
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` / `AlreadySubmitted`.
    pub fn on_prev(&mut self) -> Result<&Session, ExamError> {
        let session = self.session_mut()?;
        session.retreat();
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` / `AlreadySubmitted`, or
    /// `QuestionOutOfRange` for a bad index.
    pub fn on_jump(&mut self, question_index: usize) -> Result<&Session, ExamError> {
        let session = self.session_mut()?;
        session.jump_to(question_index)?;
        Ok(session)
    }

    /// Score the attempt. Unanswered questions are allowed.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` or `AlreadySubmitted`.
    pub fn on_submit(&mut self) -> Result<ExamResult, ExamError> {
        let session = self.session_mut()?.clone();
        let result = score(&session, self.clock.now());
        tracing::info!(
            set = %result.set_id(),
            attempted = result.attempted(),
            correct = result.correct(),
            percentage = result.percentage(),
            "exam submitted"
        );
        self.phase = ExamPhase::Submitted {
            session,
            result: result.clone(),
        };
        Ok(result)
    }

    /// Start over on the same set, during or after an attempt.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::NoActiveSession` if nothing was started yet.
    pub fn on_retry(&mut self) -> Result<&Session, ExamError> {
        let fresh = match &self.phase {
            ExamPhase::InProgress(session) | ExamPhase::Submitted { session, .. } => {
                session.restart(self.clock.now())
            }
            ExamPhase::Setup => return Err(ExamError::NoActiveSession),
        };
        self.phase = ExamPhase::InProgress(fresh);
        self.session().ok_or(ExamError::NoActiveSession)
    }

    /// Back to set selection, discarding the current attempt.
    pub fn reset(&mut self) {
        self.phase = ExamPhase::Setup;
    }

    #[cfg(test)]
    pub(crate) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}
