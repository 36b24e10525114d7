//! TUI screen components
//!
//! Contains individual screen implementations for the quiz, results and
//! review panels.

pub mod quiz;
pub mod results;
pub mod review;

pub use quiz::QuizScreen;
pub use results::{ResultAction, ResultsScreen};
pub use review::ReviewScreen;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Key hints in the style shared by every screen's help bar
pub(crate) fn help_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let spans: Vec<Span<'a>> = hints
        .iter()
        .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
        .collect();
    Line::from(spans)
}

/// Flatten a test buffer into one string
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content.iter().map(|cell| cell.symbol()).collect()
}
