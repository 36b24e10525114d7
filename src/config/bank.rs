//! Question bank loading
//!
//! The bank is an ordered, immutable list of questions. It is validated in
//! full when it is built, so the engine never sees a question whose correct
//! answer is missing from its options.

use crate::models::Question;
use crate::{QuizError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Validated, ordered list of questions shared read-only by the engine
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

/// On-disk layout: `[[questions]]` in TOML, `{"questions": [...]}` in JSON
#[derive(Debug, Serialize, Deserialize)]
struct BankFile {
    questions: Vec<Question>,
}

/// JSON banks may also be a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonBank {
    Table(BankFile),
    List(Vec<Question>),
}

impl QuestionBank {
    /// Build a bank, failing fast on the first question that breaks an
    /// integrity rule
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::BankError(
                "the question bank is empty".to_string(),
            ));
        }

        for (i, question) in questions.iter().enumerate() {
            question.validate(i + 1)?;
        }

        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Load a bank from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::BankError(format!(
                "Failed to read question bank {}: {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let questions = match extension.as_deref() {
            Some("json") => Self::parse_json(&content),
            Some("toml") | None => Self::parse_toml(&content),
            Some(other) => Err(QuizError::BankError(format!(
                "Unsupported question bank format '.{}' (expected .toml or .json)",
                other
            ))),
        }
        .map_err(|e| match e {
            QuizError::BankError(msg) | QuizError::ConfigError(msg) => {
                QuizError::BankError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        let bank = Self::new(questions)?;
        tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
        Ok(bank)
    }

    fn parse_toml(content: &str) -> Result<Vec<Question>> {
        let file: BankFile = toml::from_str(content)?;
        Ok(file.questions)
    }

    fn parse_json(content: &str) -> Result<Vec<Question>> {
        let bank: JsonBank = serde_json::from_str(content)?;
        Ok(match bank {
            JsonBank::Table(file) => file.questions,
            JsonBank::List(questions) => questions,
        })
    }

    /// Serialize the bank as TOML, in the layout `load` accepts
    pub fn to_toml(&self) -> Result<String> {
        let file = BankFile {
            questions: self.questions.to_vec(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// The bank shipped with the binary
    pub fn builtin() -> Self {
        let questions = builtin_questions();
        Self {
            questions: questions.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new(
            "Which HTML element is used to define important text with strong emphasis?",
            ["<em>", "<strong>", "<b>", "<mark>"],
            "<strong>",
        ),
        Question::new(
            "In CSS, which property controls the space outside an element's border?",
            ["padding", "margin", "outline", "gap"],
            "margin",
        ),
        Question::new(
            "Which method attaches an event handler to an element in JavaScript?",
            [
                "element.attach()",
                "element.addEvent()",
                "element.addEventListener()",
                "element.on()",
            ],
            "element.addEventListener()",
        ),
        Question::new(
            "Which array method returns a new array with elements that pass a test?",
            ["map()", "reduce()", "filter()", "forEach()"],
            "filter()",
        ),
        Question::new(
            "Which CSS unit scales based on the root font size?",
            ["em", "rem", "vh", "ch"],
            "rem",
        ),
        Question::new(
            "Which JavaScript keyword creates a block-scoped variable?",
            ["var", "let", "const", "static"],
            "let",
        ),
        Question::new(
            "What does the CSS property 'backdrop-filter' do?",
            [
                "Applies graphical effects like blur to the area behind an element",
                "Adds a shadow behind the element",
                "Clips the element content",
                "Filters children only",
            ],
            "Applies graphical effects like blur to the area behind an element",
        ),
        Question::new(
            "Which HTTP status code indicates a successful request?",
            ["200", "301", "404", "500"],
            "200",
        ),
    ]
}
