//! quizterm - timed quiz in the terminal
//!
//! Presents multiple-choice questions one at a time with a per-question
//! countdown, scores answers with negative marking, and offers a review
//! transcript and restart once the quiz is finished.

use std::fmt;

pub mod app;
pub mod config;
pub mod models;
pub mod quiz;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Question bank failed its integrity checks
    BankError(String),
    /// The question at this index already has an answer record
    AlreadyResolved(usize),
    /// Advance requested before the current question was resolved
    Unresolved(usize),
    /// Operation requires an active question but the quiz is over
    QuizFinished,
    /// Selected text is not one of the question's options
    UnknownOption(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::BankError(msg) => write!(f, "Question bank error: {}", msg),
            QuizError::AlreadyResolved(index) => {
                write!(f, "Question {} has already been answered", index + 1)
            }
            QuizError::Unresolved(index) => {
                write!(f, "Question {} has not been answered yet", index + 1)
            }
            QuizError::QuizFinished => write!(f, "The quiz is already finished"),
            QuizError::UnknownOption(text) => write!(f, "Not an option: {:?}", text),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::BankError(format!("JSON parsing error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for quiz operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Convert error to a short message suitable for printing after the
    /// terminal has been restored
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::BankError(msg) => {
                format!("The question bank is invalid: {}. Fix the bank file and try again.", msg)
            }
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            QuizError::IoError(err) if err.kind() == std::io::ErrorKind::NotFound => {
                format!("File not found: {}", err)
            }
            QuizError::TuiError(_) => {
                "The terminal could not be initialised. Is this an interactive terminal?"
                    .to_string()
            }
            _ => error.to_string(),
        }
    }

    /// Whether this error is a broken invariant rather than bad input
    pub fn is_defect(error: &QuizError) -> bool {
        matches!(
            error,
            QuizError::AlreadyResolved(_)
                | QuizError::Unresolved(_)
                | QuizError::QuizFinished
                | QuizError::UnknownOption(_)
        )
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizterm";
pub const CONFIG_FILE: &str = "quizterm.toml";
pub const LOG_FILE: &str = "quizterm.log";
pub const LOG_ENV: &str = "QUIZTERM_LOG";
