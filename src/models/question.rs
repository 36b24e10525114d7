//! Question records
//!
//! A question is immutable once it has passed validation. The option order
//! stored here is the canonical order; presentation shuffles a copy.

use crate::{QuizError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Most options a question may have: one per digit key 1-9, labelled
/// A to I so no label shadows a command key
pub const MAX_OPTIONS: usize = 9;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player
    #[serde(alias = "question")]
    pub prompt: String,
    /// Distinct answer choices in canonical order
    pub options: Vec<String>,
    /// Must equal exactly one entry of `options`
    #[serde(alias = "correctAnswer")]
    pub correct_answer: String,
}

impl Question {
    pub fn new<P, O, S, C>(prompt: P, options: O, correct_answer: C) -> Self
    where
        P: Into<String>,
        O: IntoIterator<Item = S>,
        S: Into<String>,
        C: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Check the data-integrity preconditions of a single question.
    /// `number` is 1-based and only used in the error message.
    pub fn validate(&self, number: usize) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(QuizError::BankError(format!(
                "question {} has an empty prompt",
                number
            )));
        }

        if self.options.len() < 2 {
            return Err(QuizError::BankError(format!(
                "question {} needs at least 2 options, found {}",
                number,
                self.options.len()
            )));
        }

        if self.options.len() > MAX_OPTIONS {
            return Err(QuizError::BankError(format!(
                "question {} has {} options, at most {} are allowed",
                number,
                self.options.len(),
                MAX_OPTIONS
            )));
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if option.trim().is_empty() {
                return Err(QuizError::BankError(format!(
                    "question {} has an empty option",
                    number
                )));
            }
            if !seen.insert(option.as_str()) {
                return Err(QuizError::BankError(format!(
                    "question {} lists option {:?} more than once",
                    number, option
                )));
            }
        }

        if !self.has_option(&self.correct_answer) {
            return Err(QuizError::BankError(format!(
                "question {}: correct answer {:?} is not one of its options",
                number, self.correct_answer
            )));
        }

        Ok(())
    }

    /// Whether `text` is one of this question's options
    pub fn has_option(&self, text: &str) -> bool {
        self.options.iter().any(|o| o == text)
    }

    pub fn is_correct(&self, text: &str) -> bool {
        self.correct_answer == text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new("Which CSS unit scales with the root font size?", ["em", "rem", "vh"], "rem")
    }

    #[test]
    fn test_valid_question() {
        assert!(sample().validate(1).is_ok());
    }

    #[test]
    fn test_correct_answer_must_be_an_option() {
        let mut q = sample();
        q.correct_answer = "px".to_string();
        let err = q.validate(3).unwrap_err();
        assert!(matches!(err, QuizError::BankError(_)));
        assert!(err.to_string().contains("question 3"));
        assert!(err.to_string().contains("px"));
    }

    #[test]
    fn test_duplicate_options_rejected() {
        let q = Question::new("dup", ["a", "b", "a"], "a");
        assert!(q.validate(1).is_err());
    }

    #[test]
    fn test_too_few_options_rejected() {
        let q = Question::new("one", ["only"], "only");
        assert!(q.validate(1).is_err());
    }

    #[test]
    fn test_too_many_options_rejected() {
        let options: Vec<String> = (1..=MAX_OPTIONS + 1).map(|i| i.to_string()).collect();
        let q = Question::new("pick one", options.clone(), "1");
        assert!(q.validate(1).is_err());

        let q = Question::new("pick one", options[..MAX_OPTIONS].to_vec(), "1");
        assert!(q.validate(1).is_ok());
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let q = Question::new("  ", ["a", "b"], "a");
        assert!(q.validate(1).is_err());
    }

    #[test]
    fn test_accepts_camel_case_field_names() {
        let json = r#"{"question": "2+2?", "options": ["3", "4"], "correctAnswer": "4"}"#;
        let q: Question = serde_json::from_str(json).expect("parse");
        assert_eq!(q.prompt, "2+2?");
        assert!(q.is_correct("4"));
        assert!(!q.is_correct("3"));
    }
}
