//! Review transcript
//!
//! Turns the finished answer log into display rows. Purely presentational:
//! the verdict only picks a style.

use crate::models::{AnswerRecord, Outcome};

/// Shown in place of an answer for skipped or timed-out questions
pub const SKIPPED_MARKER: &str = "Skipped";

/// Styling hint for one transcript row
pub type Verdict = Outcome;

/// One row of the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// 1-based question number
    pub number: usize,
    pub prompt: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub verdict: Verdict,
}

impl ReviewEntry {
    /// The player's literal answer, or the skipped marker
    pub fn answer_display(&self) -> &str {
        self.user_answer.as_deref().unwrap_or(SKIPPED_MARKER)
    }
}

/// Build the transcript in question order
pub fn build_transcript(log: &[AnswerRecord]) -> Vec<ReviewEntry> {
    let mut records: Vec<&AnswerRecord> = log.iter().collect();
    records.sort_by_key(|r| r.question_index);

    records
        .into_iter()
        .map(|record| ReviewEntry {
            number: record.question_index + 1,
            prompt: record.prompt.clone(),
            user_answer: record.user_answer.clone(),
            correct_answer: record.correct_answer.clone(),
            verdict: record.outcome(),
        })
        .collect()
}
