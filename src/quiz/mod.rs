//! Quiz logic module
//!
//! Scoring engine, countdown and timer tasks, option presentation, the
//! review transcript, and the controller that ties them to input events.

pub mod controller;
pub mod engine;
pub mod options;
pub mod review;
pub mod timer;

pub use controller::{Feedback, QuizController, QuizInput, Screen};
pub use engine::{Phase, QuizEngine};
pub use options::{PresentedOption, PresentedOptions};
pub use review::{build_transcript, ReviewEntry, Verdict, SKIPPED_MARKER};
pub use timer::{Countdown, TaskId, TaskScheduler, TickOutcome, TimerEvent};
