//! Configuration management module
//!
//! Handles loading, saving, and validation of quiz settings, and
//! loading of the question bank.

use crate::{QuizError, Result, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod bank;

pub use bank::QuestionBank;

/// Quiz configuration read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Countdown length for each question
    #[serde(with = "duration_serde")]
    pub question_duration: Duration,
    /// Length of one countdown unit
    #[serde(with = "duration_serde")]
    pub tick_interval: Duration,
    /// Pause after an answer before moving on, so feedback can be seen
    #[serde(with = "duration_serde")]
    pub feedback_delay: Duration,
    /// Fraction subtracted from the score for each wrong answer
    pub negative_mark: f64,
    /// Shuffle the displayed option order of each question
    pub shuffle_options: bool,
    /// Question bank file; the built-in bank is used when unset
    pub bank: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_duration: Duration::from_secs(15),
            tick_interval: Duration::from_secs(1),
            feedback_delay: Duration::from_millis(700),
            negative_mark: 0.25,
            shuffle_options: true,
            bank: None,
        }
    }
}

impl QuizConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(QuizError::ConfigError(
                "Tick interval must be greater than 0".to_string(),
            ));
        }

        if self.question_duration < self.tick_interval {
            return Err(QuizError::ConfigError(format!(
                "Question duration ({}) must be at least one tick ({})",
                humantime::format_duration(self.question_duration),
                humantime::format_duration(self.tick_interval)
            )));
        }

        const MAX_QUESTION_DURATION: Duration = Duration::from_secs(3600);
        if self.question_duration > MAX_QUESTION_DURATION {
            return Err(QuizError::ConfigError(format!(
                "Question duration too long: {}s (max: {}s)",
                self.question_duration.as_secs(),
                MAX_QUESTION_DURATION.as_secs()
            )));
        }

        const MAX_FEEDBACK_DELAY: Duration = Duration::from_secs(10);
        if self.feedback_delay > MAX_FEEDBACK_DELAY {
            return Err(QuizError::ConfigError(format!(
                "Feedback delay too long: {}ms (max: {}ms)",
                self.feedback_delay.as_millis(),
                MAX_FEEDBACK_DELAY.as_millis()
            )));
        }

        if !self.negative_mark.is_finite() || !(0.0..=1.0).contains(&self.negative_mark) {
            return Err(QuizError::ConfigError(format!(
                "Negative mark must be between 0.0 and 1.0, got {}",
                self.negative_mark
            )));
        }

        Ok(())
    }

    /// Number of countdown units per question, rounded up
    pub fn countdown_ticks(&self) -> u32 {
        let tick = self.tick_interval.as_millis().max(1);
        let total = self.question_duration.as_millis();
        ((total + tick - 1) / tick).min(u32::MAX as u128) as u32
    }

    /// Set the per-question countdown
    pub fn with_question_duration(mut self, duration: Duration) -> Self {
        self.question_duration = duration;
        self
    }

    /// Set the countdown unit
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the pause between answering and advancing
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Set the wrong-answer penalty
    pub fn with_negative_mark(mut self, mark: f64) -> Self {
        self.negative_mark = mark;
        self
    }

    /// Enable or disable option shuffling
    pub fn with_shuffle_options(mut self, shuffle: bool) -> Self {
        self.shuffle_options = shuffle;
        self
    }

    /// Set the question bank file
    pub fn with_bank(mut self, path: PathBuf) -> Self {
        self.bank = Some(path);
        self
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// when the file doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the given path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizterm/quizterm.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Load the question bank this configuration points at
    pub fn load_bank(&self) -> Result<QuestionBank> {
        match &self.bank {
            Some(path) => QuestionBank::load(path),
            None => Ok(QuestionBank::builtin()),
        }
    }
}

/// Durations are written as humantime strings such as "15s" or "700ms"
mod duration_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(D::Error::custom)
    }
}
