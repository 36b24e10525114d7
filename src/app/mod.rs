//! TUI application module
//!
//! Contains the terminal user interface components, screen rendering,
//! and key handling.

pub mod app;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{App, AppView};
pub use screens::{QuizScreen, ResultAction, ResultsScreen, ReviewScreen};
pub use state::{key_to_navigation, NavigationAction};
pub use tui::Tui;
