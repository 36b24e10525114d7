//! Utility functions module
//!
//! Contains formatting helpers for scores, countdowns and durations.

pub mod format;

// Re-export commonly used functions
pub use format::{format_elapsed, format_remaining, format_score, pad_time, progress_ratio};
