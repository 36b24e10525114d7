//! Data models module
//!
//! Contains question records, per-session state, answer records and the
//! finished-quiz summary.

pub mod question;
pub mod session;

// Re-export commonly used types
pub use question::{Question, MAX_OPTIONS};
pub use session::{expected_score, AnswerRecord, Outcome, SessionState, SessionSummary};
