//! Review screen implementation
//!
//! Scrollable transcript of every question with the player's answer and
//! the correct one.

use super::help_line;
use crate::quiz::{ReviewEntry, Verdict};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Review screen component
#[derive(Debug, Default)]
pub struct ReviewScreen {
    scroll: u16,
}

impl ReviewScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Render the review screen
    pub fn render(&mut self, f: &mut Frame, entries: &[ReviewEntry]) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(6),    // Transcript
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Review")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, chunks[0]);

        self.render_transcript(f, chunks[1], entries);

        let help = Paragraph::new(help_line(&[
            ("↑↓", " Scroll  "),
            ("B", " Back to results  "),
            ("R", " Restart  "),
            ("Q", " Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, chunks[2]);
    }

    fn render_transcript(&mut self, f: &mut Frame, area: Rect, entries: &[ReviewEntry]) {
        let inner_width = usize::from(area.width.saturating_sub(2));
        let rows = transcript_lines(entries, inner_width);

        // Rows are pre-wrapped, so the last one is reachable but no further
        let visible = usize::from(area.height.saturating_sub(2));
        let max_scroll = u16::try_from(rows.len().saturating_sub(visible)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.min(max_scroll);

        let widget = Paragraph::new(rows)
            .scroll((self.scroll, 0))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}

const ANSWER_LABEL_WIDTH: usize = 19;

/// One row per terminal line at `width` columns
fn transcript_lines(entries: &[ReviewEntry], width: usize) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::with_capacity(entries.len() * 4);

    for entry in entries {
        let answer_style = match entry.verdict {
            Verdict::Correct => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            Verdict::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Verdict::Skipped => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        };

        let heading = format!("Q{}. {}", entry.number, entry.prompt);
        for row in wrap_text(&heading, width) {
            lines.push(Line::from(Span::styled(
                row,
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        push_labelled(&mut lines, width, "   Your answer:    ", label, entry.answer_display(), answer_style);
        push_labelled(
            &mut lines,
            width,
            "   Correct answer: ",
            label,
            &entry.correct_answer,
            Style::default().fg(Color::Green),
        );
        lines.push(Line::from(""));
    }

    lines
}

/// Label on the first row, value wrapped under a hanging indent
fn push_labelled(
    lines: &mut Vec<Line<'static>>,
    width: usize,
    label: &'static str,
    label_style: Style,
    value: &str,
    value_style: Style,
) {
    let indent = " ".repeat(ANSWER_LABEL_WIDTH);
    let value_width = width.saturating_sub(ANSWER_LABEL_WIDTH);
    for (i, row) in wrap_text(value, value_width).into_iter().enumerate() {
        let lead = if i == 0 {
            Span::styled(label, label_style)
        } else {
            Span::raw(indent.clone())
        };
        lines.push(Line::from(vec![lead, Span::styled(row, value_style)]));
    }
}

fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Greedy word wrap; words wider than a row are split across rows
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        let gap = usize::from(!row.is_empty());
        if row_width + gap + word_width <= width {
            if gap == 1 {
                row.push(' ');
            }
            row.push_str(word);
            row_width += gap + word_width;
            continue;
        }

        if !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }
        if word_width <= width {
            row.push_str(word);
            row_width = word_width;
            continue;
        }

        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let ch_width = display_width(ch.encode_utf8(&mut buf));
            if row_width + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(ch);
            row_width += ch_width;
        }
    }

    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}
