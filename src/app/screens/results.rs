//! Results screen implementation
//!
//! Displays the final score and per-outcome counts, with buttons to open
//! the review transcript or start over.

use super::help_line;
use crate::models::SessionSummary;
use crate::util::{format_elapsed, format_score};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Available actions on the results screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAction {
    Review,
    Restart,
}

impl ResultAction {
    /// Get all available actions
    pub fn all() -> Vec<Self> {
        vec![Self::Review, Self::Restart]
    }

    /// Get display text for the action
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Review => "Review Answers",
            Self::Restart => "Restart Quiz",
        }
    }
}

/// Results screen component
#[derive(Debug)]
pub struct ResultsScreen {
    selected_action: ResultAction,
}

impl ResultsScreen {
    /// Create a new results screen
    pub fn new() -> Self {
        Self {
            selected_action: ResultAction::Review,
        }
    }

    /// Get selected action
    pub fn selected_action(&self) -> &ResultAction {
        &self.selected_action
    }

    /// Select next action
    pub fn select_next_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions.iter().position(|a| a == &self.selected_action).unwrap_or(0);
        let next_index = (current_index + 1) % actions.len();
        self.selected_action = actions[next_index].clone();
    }

    /// Select previous action
    pub fn select_previous_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions.iter().position(|a| a == &self.selected_action).unwrap_or(0);
        let prev_index = if current_index == 0 { actions.len() - 1 } else { current_index - 1 };
        self.selected_action = actions[prev_index].clone();
    }

    /// Render the results screen
    pub fn render(&self, f: &mut Frame, summary: Option<&SessionSummary>) {
        let size = f.size();

        let Some(summary) = summary else {
            self.render_no_results(f, size);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Final score
                Constraint::Min(7),    // Counts table
                Constraint::Length(3), // Actions
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_score(f, chunks[1], summary);
        self.render_counts(f, chunks[2], summary);
        self.render_actions(f, chunks[3]);
        self.render_help(f, chunks[4]);
    }

    fn render_no_results(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("The quiz has not finished yet"),
            Line::from(""),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title("Results")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(paragraph, area);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Quiz Complete")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );

        f.render_widget(title, area);
    }

    fn render_score(&self, f: &mut Frame, area: Rect, summary: &SessionSummary) {
        let color = if summary.score < 0.0 {
            Color::Red
        } else if summary.correct_count == summary.total {
            Color::Green
        } else {
            Color::Yellow
        };

        let text = vec![
            Line::from(""),
            Line::from(format!(
                "Final score: {} / {}",
                format_score(summary.score),
                summary.total
            )),
        ];

        let widget = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn render_counts(&self, f: &mut Frame, area: Rect, summary: &SessionSummary) {
        let correct_str = summary.correct_count.to_string();
        let incorrect_str = summary.incorrect_count.to_string();
        let skipped_str = summary.skipped_count.to_string();
        let elapsed_str = format_elapsed(summary.elapsed());
        let finished_str = summary
            .finished_at
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string();

        let rows = vec![
            Row::new(vec!["Correct:", correct_str.as_str()]).style(Style::default().fg(Color::Green)),
            Row::new(vec!["Incorrect:", incorrect_str.as_str()]).style(Style::default().fg(Color::Red)),
            Row::new(vec!["Skipped:", skipped_str.as_str()]).style(Style::default().fg(Color::DarkGray)),
            Row::new(vec!["", ""]),
            Row::new(vec!["Time taken:", elapsed_str.as_str()]),
            Row::new(vec!["Finished at:", finished_str.as_str()]),
        ];

        let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
            .block(
                Block::default()
                    .title("Breakdown")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .column_spacing(2);

        f.render_widget(table, area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let actions_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(40), // Fixed width for actions
                Constraint::Min(0),
            ])
            .split(area)[1];

        let action_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(actions_area);

        for (action, chunk) in ResultAction::all().iter().zip(action_chunks.iter()) {
            let selected = *action == self.selected_action;
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let button = Paragraph::new(action.display_text())
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(if selected {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                }));

            f.render_widget(button, *chunk);
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = Paragraph::new(help_line(&[
            ("←→", " Navigate  "),
            ("Enter", " Select  "),
            ("V", " Review  "),
            ("R", " Restart  "),
            ("Q", " Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        f.render_widget(help, area);
    }
}

impl Default for ResultsScreen {
    fn default() -> Self {
        Self::new()
    }
}
