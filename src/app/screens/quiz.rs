//! Quiz screen implementation
//!
//! Shows the current question with its options, the countdown, running
//! score and progress. After an answer the chosen option is marked and the
//! correct one highlighted until the quiz moves on.

use super::help_line;
use crate::models::Outcome;
use crate::quiz::QuizController;
use crate::util::{format_remaining, format_score, pad_time, progress_ratio};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Quiz screen component with option highlighting
#[derive(Debug)]
pub struct QuizScreen {
    highlighted: usize,
    list_state: ListState,
    /// Question index the highlight belongs to
    question_index: Option<usize>,
}

impl QuizScreen {
    /// Create a new quiz screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            highlighted: 0,
            list_state,
            question_index: None,
        }
    }

    /// Reset the highlight when a different question comes up
    pub fn sync(&mut self, question_index: usize) {
        if self.question_index != Some(question_index) {
            self.question_index = Some(question_index);
            self.highlighted = 0;
            self.list_state.select(Some(0));
        }
    }

    /// Forget the current question, e.g. after a restart
    pub fn reset(&mut self) {
        self.question_index = None;
        self.highlighted = 0;
        self.list_state.select(Some(0));
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Move highlight up, wrapping to the last option
    pub fn select_previous(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if self.highlighted > 0 {
            self.highlighted -= 1;
        } else {
            self.highlighted = option_count - 1;
        }
        self.list_state.select(Some(self.highlighted));
    }

    /// Move highlight down, wrapping to the first option
    pub fn select_next(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if self.highlighted + 1 < option_count {
            self.highlighted += 1;
        } else {
            self.highlighted = 0;
        }
        self.list_state.select(Some(self.highlighted));
    }

    /// Render the quiz screen
    pub fn render(&mut self, f: &mut Frame, quiz: &QuizController) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(3), // Countdown
                Constraint::Length(5), // Question
                Constraint::Min(6),    // Options
                Constraint::Length(3), // Progress
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_status(f, chunks[0], quiz);
        self.render_countdown(f, chunks[1], quiz);
        self.render_question(f, chunks[2], quiz);
        self.render_options(f, chunks[3], quiz);
        self.render_progress(f, chunks[4], quiz);
        self.render_help(f, chunks[5], quiz);
    }

    fn render_status(&self, f: &mut Frame, area: Rect, quiz: &QuizController) {
        let (shown, total) = quiz.progress();
        let score = format_score(quiz.score());

        let status = Line::from(vec![
            Span::styled(
                format!("Question {}/{}", shown, total),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::raw("Score: "),
            Span::styled(score, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::raw("Time: "),
            Span::styled(
                pad_time(quiz.countdown().remaining()),
                Style::default().fg(timer_color(quiz)).add_modifier(Modifier::BOLD),
            ),
        ]);

        let widget = Paragraph::new(status).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(widget, area);
    }

    fn render_countdown(&self, f: &mut Frame, area: Rect, quiz: &QuizController) {
        let countdown = quiz.countdown();
        let gauge = Gauge::default()
            .block(Block::default().title("Time left").borders(Borders::ALL))
            .gauge_style(Style::default().fg(timer_color(quiz)))
            .ratio(countdown.fraction_remaining().clamp(0.0, 1.0))
            .label(format_remaining(quiz.remaining_time()));
        f.render_widget(gauge, area);
    }

    fn render_question(&self, f: &mut Frame, area: Rect, quiz: &QuizController) {
        let prompt = quiz.question().map(|q| q.prompt.as_str()).unwrap_or_default();
        let widget = Paragraph::new(prompt)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Question").borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn render_options(&mut self, f: &mut Frame, area: Rect, quiz: &QuizController) {
        let feedback = quiz.feedback();

        let items: Vec<ListItem> = quiz
            .presented()
            .iter()
            .map(|option| {
                let mut style = Style::default();
                let mut marker = "";
                if let Some(feedback) = feedback {
                    if option.text == feedback.correct_answer {
                        style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                        marker = "  ✓";
                    } else if option.text == feedback.selected
                        && feedback.outcome == Outcome::Incorrect
                    {
                        style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
                        marker = "  ✗";
                    } else {
                        style = style.fg(Color::DarkGray);
                    }
                }
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", option.label), style.add_modifier(Modifier::BOLD)),
                    Span::styled(option.text.clone(), style),
                    Span::styled(marker, style),
                ]))
            })
            .collect();

        let mut list = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
        if !quiz.is_locked() {
            list = list
                .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, area, &mut self.list_state);
        } else {
            f.render_widget(list, area);
        }
    }

    fn render_progress(&self, f: &mut Frame, area: Rect, quiz: &QuizController) {
        let (shown, total) = quiz.progress();
        let answered = quiz.session().resolved_count();
        let gauge = Gauge::default()
            .block(Block::default().title("Progress").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(progress_ratio(answered, total))
            .label(format!("{} / {}", shown, total));
        f.render_widget(gauge, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, quiz: &QuizController) {
        let last = quiz.presented().get(quiz.presented().len().saturating_sub(1));
        let range = format!("A-{}", last.map(|o| o.label).unwrap_or('A'));
        let next_label = if quiz.is_locked() { " Next  " } else { " Skip  " };

        let help = Paragraph::new(help_line(&[
            (range.as_str(), " Answer  "),
            ("↑↓ Enter", " Pick  "),
            ("N", next_label),
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

impl Default for QuizScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Green while plenty of time remains, then yellow, then red
fn timer_color(quiz: &QuizController) -> Color {
    let fraction = quiz.countdown().fraction_remaining();
    if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::buffer_text;
    use crate::config::{QuestionBank, QuizConfig};
    use crate::quiz::QuizInput;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn controller() -> QuizController {
        let config = QuizConfig::default()
            .with_shuffle_options(false)
            .with_tick_interval(Duration::from_secs(60))
            .with_question_duration(Duration::from_secs(15 * 60))
            .with_feedback_delay(Duration::from_secs(5));
        let (mut c, _rx) =
            QuizController::with_rng(QuestionBank::builtin(), &config, SmallRng::seed_from_u64(1));
        c.start();
        c
    }

    #[test]
    fn test_highlight_wraps() {
        let mut screen = QuizScreen::new();
        screen.select_previous(4);
        assert_eq!(screen.highlighted(), 3);
        screen.select_next(4);
        assert_eq!(screen.highlighted(), 0);
        screen.select_next(4);
        assert_eq!(screen.highlighted(), 1);
    }

    #[test]
    fn test_sync_resets_highlight_on_new_question() {
        let mut screen = QuizScreen::new();
        screen.sync(0);
        screen.select_next(4);
        screen.sync(0);
        assert_eq!(screen.highlighted(), 1);
        screen.sync(1);
        assert_eq!(screen.highlighted(), 0);
    }

    #[tokio::test]
    async fn test_render_shows_question_and_timer() {
        let quiz = controller();
        let mut screen = QuizScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| screen.render(f, &quiz)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Question 1/8"));
        assert!(text.contains("Time: 15"));
        // 15 one-minute ticks
        assert!(text.contains("15m 00s"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("<strong>"));
    }

    #[tokio::test]
    async fn test_render_marks_answer() {
        let mut quiz = controller();
        quiz.dispatch(QuizInput::Select("<em>".to_string())).unwrap();
        let mut screen = QuizScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| screen.render(f, &quiz)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("✗"));
        assert!(text.contains("✓"));
        assert!(text.contains("Score: -0.25"));
    }
}
