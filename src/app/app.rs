//! Main application controller
//!
//! Owns the terminal, the quiz controller and the screen components, and
//! runs the loop that feeds timer wakeups and key presses to the quiz one
//! at a time.

use crate::{
    app::{
        screens::{QuizScreen, ResultAction, ResultsScreen, ReviewScreen},
        state::{key_to_navigation, NavigationAction},
        tui::Tui,
    },
    config::{QuestionBank, QuizConfig},
    quiz::{Phase, QuizController, QuizInput, Screen, TimerEvent},
    QuizError, Result,
};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use tokio::sync::mpsc;

/// Screen components plus the quiz they display. Everything here runs
/// without a terminal, which keeps key handling testable.
#[derive(Debug)]
pub struct AppView {
    controller: QuizController,
    quiz_screen: QuizScreen,
    results_screen: ResultsScreen,
    review_screen: ReviewScreen,
    should_quit: bool,
}

impl AppView {
    pub fn new(controller: QuizController) -> Self {
        Self {
            controller,
            quiz_screen: QuizScreen::new(),
            results_screen: ResultsScreen::new(),
            review_screen: ReviewScreen::new(),
            should_quit: false,
        }
    }

    /// Start the first session
    pub fn start(&mut self) {
        self.controller.start();
        self.quiz_screen.reset();
        self.sync_screens();
    }

    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Feed one timer wakeup to the quiz
    pub fn handle_timer(&mut self, event: TimerEvent) -> Result<()> {
        self.controller.handle_timer(event)?;
        self.sync_screens();
        Ok(())
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = key_to_navigation(
            key,
            self.controller.screen(),
            self.controller.presented().len(),
        );
        self.handle_navigation(action)
    }

    /// Route a navigation action to the screen that is showing
    pub fn handle_navigation(&mut self, action: NavigationAction) -> Result<()> {
        if action == NavigationAction::Quit {
            self.quit();
            return Ok(());
        }

        match self.controller.screen() {
            Screen::Quiz => self.handle_quiz_navigation(action)?,
            Screen::Results => self.handle_results_navigation(action)?,
            Screen::Review => self.handle_review_navigation(action)?,
        }
        self.sync_screens();
        Ok(())
    }

    fn handle_quiz_navigation(&mut self, action: NavigationAction) -> Result<()> {
        let option_count = self.controller.presented().len();
        match action {
            NavigationAction::Up => self.quiz_screen.select_previous(option_count),
            NavigationAction::Down => self.quiz_screen.select_next(option_count),
            NavigationAction::Select => {
                let index = self.quiz_screen.highlighted();
                self.choose(index)?;
            }
            NavigationAction::Choose(index) => self.choose(index)?,
            NavigationAction::Skip => self.controller.dispatch(QuizInput::Skip)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_results_navigation(&mut self, action: NavigationAction) -> Result<()> {
        match action {
            NavigationAction::Left => self.results_screen.select_previous_action(),
            NavigationAction::Right => self.results_screen.select_next_action(),
            NavigationAction::Select => match self.results_screen.selected_action() {
                ResultAction::Review => self.show_review()?,
                ResultAction::Restart => self.restart()?,
            },
            NavigationAction::Review => self.show_review()?,
            NavigationAction::Restart => self.restart()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_review_navigation(&mut self, action: NavigationAction) -> Result<()> {
        match action {
            NavigationAction::Up => self.review_screen.scroll_up(),
            NavigationAction::Down => self.review_screen.scroll_down(),
            NavigationAction::Back => self.controller.dispatch(QuizInput::BackToResults)?,
            NavigationAction::Restart => self.restart()?,
            _ => {}
        }
        Ok(())
    }

    /// Answer with the option shown at `index`, by its text
    fn choose(&mut self, index: usize) -> Result<()> {
        if self.controller.is_locked() {
            return Ok(());
        }
        let text = self
            .controller
            .presented()
            .get(index)
            .map(|o| o.text.clone())
            .ok_or_else(|| QuizError::UnknownOption(format!("option #{}", index + 1)))?;
        self.controller.dispatch(QuizInput::Select(text))
    }

    fn show_review(&mut self) -> Result<()> {
        self.review_screen.reset();
        self.controller.dispatch(QuizInput::ShowReview)
    }

    fn restart(&mut self) -> Result<()> {
        self.controller.dispatch(QuizInput::Restart)?;
        self.quiz_screen.reset();
        Ok(())
    }

    fn sync_screens(&mut self) {
        if let Phase::Active(index) = self.controller.phase() {
            self.quiz_screen.sync(index);
        }
    }

    /// Draw the current screen
    pub fn render(&mut self, f: &mut Frame) {
        match self.controller.screen() {
            Screen::Quiz => self.quiz_screen.render(f, &self.controller),
            Screen::Results => self.results_screen.render(f, self.controller.summary()),
            Screen::Review => {
                let transcript = self.controller.transcript();
                self.review_screen.render(f, &transcript)
            }
        }
    }

    /// Cancel pending timers before exit
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    view: AppView,
    /// Wakeups from the countdown and deferred-advance tasks
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
}

impl App {
    /// Create a new application instance. Must be called inside a tokio
    /// runtime.
    pub fn new(bank: QuestionBank, config: &QuizConfig) -> Result<Self> {
        let tui = Tui::new().map_err(|e| QuizError::TuiError(e.to_string()))?;
        let (controller, timer_rx) = QuizController::new(bank, config);
        Ok(Self {
            tui,
            view: AppView::new(controller),
            timer_rx,
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| QuizError::TuiError(e.to_string()))?;
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.view.start();

        while !self.view.should_quit() {
            // Drain timer events first; each is handled to completion
            while let Ok(event) = self.timer_rx.try_recv() {
                self.view.handle_timer(event)?;
            }

            let view = &mut self.view;
            self.tui.draw(|f| view.render(f))?;

            if let Some(key) = self.tui.next_key()? {
                self.view.handle_key(key)?;
            }

            tokio::task::yield_now().await;
        }

        self.view.shutdown();
        self.tui.restore()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn view() -> AppView {
        let config = QuizConfig::default()
            .with_shuffle_options(false)
            .with_tick_interval(Duration::from_secs(60))
            .with_question_duration(Duration::from_secs(15 * 60))
            .with_feedback_delay(Duration::from_secs(5));
        let (controller, _rx) =
            QuizController::with_rng(QuestionBank::builtin(), &config, SmallRng::seed_from_u64(9));
        let mut view = AppView::new(controller);
        view.start();
        view
    }

    fn press(view: &mut AppView, code: KeyCode) {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[tokio::test]
    async fn test_letter_key_answers_by_text() {
        let mut view = view();
        // Unshuffled: B is "<strong>", the correct answer
        press(&mut view, KeyCode::Char('b'));
        assert_eq!(view.controller().score(), 1.0);
        assert!(view.controller().is_locked());
    }

    #[tokio::test]
    async fn test_arrow_and_enter_answer_highlighted() {
        let mut view = view();
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        // C is "<b>", a wrong answer
        assert_eq!(view.controller().score(), -0.25);
    }

    #[tokio::test]
    async fn test_skipping_through_to_results_and_review() {
        let mut view = view();
        for _ in 0..8 {
            press(&mut view, KeyCode::Char('n'));
        }
        assert_eq!(view.controller().screen(), Screen::Results);
        assert_eq!(view.controller().session().skipped_count, 8);

        press(&mut view, KeyCode::Enter);
        assert_eq!(view.controller().screen(), Screen::Review);

        press(&mut view, KeyCode::Esc);
        assert_eq!(view.controller().screen(), Screen::Results);

        press(&mut view, KeyCode::Char('r'));
        assert_eq!(view.controller().screen(), Screen::Quiz);
        assert_eq!(view.controller().session().resolved_count(), 0);
    }

    #[tokio::test]
    async fn test_results_restart_button() {
        let mut view = view();
        for _ in 0..8 {
            press(&mut view, KeyCode::Tab);
        }
        press(&mut view, KeyCode::Right);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.controller().screen(), Screen::Quiz);
        assert_eq!(view.controller().phase(), Phase::Active(0));
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut view = view();
        press(&mut view, KeyCode::Char('q'));
        assert!(view.should_quit());
    }
}
