//! Session state and answer records
//!
//! Contains the mutable per-run state owned by the quiz engine, the
//! immutable answer records it appends, and the summary frozen when the
//! quiz finishes.

use crate::models::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a question was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// No selection, either by explicit skip or by timeout
    Skipped,
}

/// Record of one resolved question, created exactly once per question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Zero-based position in the question bank
    pub question_index: usize,
    pub prompt: String,
    /// Options in canonical order, independent of how they were shown
    pub options: Vec<String>,
    pub correct_answer: String,
    /// `None` means skipped or timed out
    pub user_answer: Option<String>,
}

impl AnswerRecord {
    pub fn new(question_index: usize, question: &Question, user_answer: Option<String>) -> Self {
        Self {
            question_index,
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            user_answer,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match &self.user_answer {
            None => Outcome::Skipped,
            Some(answer) if *answer == self.correct_answer => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
        }
    }
}

/// Mutable state of one quiz run
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Index of the question being shown; equals the bank size once finished
    pub current_index: usize,
    pub score: f64,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub skipped_count: usize,
    pub answer_log: Vec<AnswerRecord>,
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            score: 0.0,
            correct_count: 0,
            incorrect_count: 0,
            skipped_count: 0,
            answer_log: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Number of questions that have an answer record
    pub fn resolved_count(&self) -> usize {
        self.correct_count + self.incorrect_count + self.skipped_count
    }

    /// Whether the question at `index` already has an answer record
    pub fn is_resolved(&self, index: usize) -> bool {
        self.answer_log.iter().any(|r| r.question_index == index)
    }

    /// Apply one outcome to the counters. The score is derived from the
    /// counters so it always equals `correct - negative_mark * incorrect`.
    pub fn record(&mut self, record: AnswerRecord, negative_mark: f64) -> Outcome {
        let outcome = record.outcome();
        match outcome {
            Outcome::Correct => self.correct_count += 1,
            Outcome::Incorrect => self.incorrect_count += 1,
            Outcome::Skipped => self.skipped_count += 1,
        }
        self.score = expected_score(self.correct_count, self.incorrect_count, negative_mark);
        self.answer_log.push(record);
        outcome
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Final metrics of a finished quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: f64,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub skipped_count: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn from_session(session: &SessionState, total: usize) -> Self {
        Self {
            score: session.score,
            correct_count: session.correct_count,
            incorrect_count: session.incorrect_count,
            skipped_count: session.skipped_count,
            total,
            started_at: session.started_at,
            finished_at: Utc::now(),
        }
    }

    /// Wall-clock time between start and finish
    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}

/// Score implied by the counters
pub fn expected_score(correct: usize, incorrect: usize, negative_mark: f64) -> f64 {
    correct as f64 - negative_mark * incorrect as f64
}
