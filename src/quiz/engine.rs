//! Quiz engine
//!
//! Owns the session state and the Active/Finished state machine. The engine
//! knows nothing about timers or rendering; the controller drives it.

use crate::config::QuestionBank;
use crate::models::{AnswerRecord, Outcome, Question, SessionState, SessionSummary};
use crate::{QuizError, Result};

/// Where the engine is in a quiz run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the question at this index
    Active(usize),
    /// Every question is resolved; metrics are frozen
    Finished,
}

/// Scoring and navigation state machine for one quiz
#[derive(Debug)]
pub struct QuizEngine {
    bank: QuestionBank,
    negative_mark: f64,
    session: SessionState,
    phase: Phase,
    summary: Option<SessionSummary>,
}

impl QuizEngine {
    /// Create an engine positioned at the first question
    pub fn new(bank: QuestionBank, negative_mark: f64) -> Self {
        let mut engine = Self {
            bank,
            negative_mark,
            session: SessionState::new(),
            phase: Phase::Active(0),
            summary: None,
        };
        engine.start();
        engine
    }

    /// Discard the current session and begin again at question 0
    pub fn start(&mut self) {
        self.session = SessionState::new();
        self.phase = Phase::Active(0);
        self.summary = None;
        tracing::info!(questions = self.bank.len(), "quiz started");
    }

    /// Resolve the current question with the player's selection, or `None`
    /// for a skip or timeout
    pub fn resolve_current(&mut self, selected: Option<&str>) -> Result<Outcome> {
        let index = match self.phase {
            Phase::Active(index) => index,
            Phase::Finished => return Err(QuizError::QuizFinished),
        };

        if self.session.is_resolved(index) {
            return Err(QuizError::AlreadyResolved(index));
        }

        let question = self.bank.get(index).ok_or(QuizError::QuizFinished)?;
        if let Some(text) = selected {
            if !question.has_option(text) {
                return Err(QuizError::UnknownOption(text.to_string()));
            }
        }

        let record = AnswerRecord::new(index, question, selected.map(str::to_string));
        let outcome = self.session.record(record, self.negative_mark);
        tracing::debug!(
            question = index + 1,
            ?outcome,
            score = self.session.score,
            "question resolved"
        );
        Ok(outcome)
    }

    /// Move past the current, already resolved question
    pub fn advance(&mut self) -> Result<Phase> {
        let index = match self.phase {
            Phase::Active(index) => index,
            Phase::Finished => return Err(QuizError::QuizFinished),
        };

        if !self.session.is_resolved(index) {
            return Err(QuizError::Unresolved(index));
        }

        self.session.current_index = index + 1;
        if self.session.current_index >= self.bank.len() {
            self.phase = Phase::Finished;
            let summary = SessionSummary::from_session(&self.session, self.bank.len());
            tracing::info!(
                score = summary.score,
                correct = summary.correct_count,
                incorrect = summary.incorrect_count,
                skipped = summary.skipped_count,
                "quiz finished"
            );
            self.summary = Some(summary);
        } else {
            self.phase = Phase::Active(self.session.current_index);
        }

        Ok(self.phase)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The question being shown, if the quiz is still running
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Active(index) => self.bank.get(index),
            Phase::Finished => None,
        }
    }

    /// Whether the current question already has its answer record
    pub fn current_resolved(&self) -> bool {
        match self.phase {
            Phase::Active(index) => self.session.is_resolved(index),
            Phase::Finished => true,
        }
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    /// Final metrics, available once finished
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }
}
