//! Quiz controller
//!
//! The boundary between input and the engine. Maps input events and timer
//! wakeups onto engine operations, guards against resolving a question
//! twice, and keeps the one timer slot in step with the question on
//! screen: the live task is always cancelled before the session moves away
//! from the question it was scheduled for.

use crate::config::{QuestionBank, QuizConfig};
use crate::models::{Outcome, Question, SessionState, SessionSummary};
use crate::quiz::engine::{Phase, QuizEngine};
use crate::quiz::options::PresentedOptions;
use crate::quiz::review::{build_transcript, ReviewEntry};
use crate::quiz::timer::{Countdown, TaskId, TaskScheduler, TickOutcome, TimerEvent};
use crate::{QuizError, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::mpsc;

/// Which panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Quiz,
    Results,
    Review,
}

/// Input triggers understood by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    /// Answer with the option carrying this text
    Select(String),
    /// Skip the question, or move on early after answering
    Skip,
    ShowReview,
    BackToResults,
    Restart,
}

/// What the player picked for the question on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub selected: String,
    pub outcome: Outcome,
    pub correct_answer: String,
}

/// Drives one quiz from input and timer events
#[derive(Debug)]
pub struct QuizController {
    engine: QuizEngine,
    countdown: Countdown,
    scheduler: TaskScheduler,
    presented: PresentedOptions,
    feedback: Option<Feedback>,
    screen: Screen,
    tick_interval: Duration,
    feedback_delay: Duration,
    shuffle_options: bool,
    rng: SmallRng,
}

impl QuizController {
    /// Create a controller and the channel its timer events arrive on.
    /// Nothing is scheduled until `start` is called.
    pub fn new(
        bank: QuestionBank,
        config: &QuizConfig,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        Self::with_rng(bank, config, SmallRng::from_entropy())
    }

    /// Same as `new` with a caller-provided shuffle source
    pub fn with_rng(
        bank: QuestionBank,
        config: &QuizConfig,
        rng: SmallRng,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (scheduler, rx) = TaskScheduler::new();
        let controller = Self {
            engine: QuizEngine::new(bank, config.negative_mark),
            countdown: Countdown::new(config.countdown_ticks()),
            scheduler,
            presented: PresentedOptions::default(),
            feedback: None,
            screen: Screen::Quiz,
            tick_interval: config.tick_interval,
            feedback_delay: config.feedback_delay,
            shuffle_options: config.shuffle_options,
            rng,
        };
        (controller, rx)
    }

    /// Begin a fresh session at question 0; also used for restart
    pub fn start(&mut self) {
        self.scheduler.cancel();
        self.countdown.stop();
        self.engine.start();
        self.screen = Screen::Quiz;
        self.present_current();
    }

    /// Dispatch one input event. Inputs that do not apply to the current
    /// screen are ignored.
    pub fn dispatch(&mut self, input: QuizInput) -> Result<()> {
        tracing::debug!(?input, screen = ?self.screen, "dispatch");
        match (self.screen, input) {
            (Screen::Quiz, QuizInput::Select(text)) => self.select(text),
            (Screen::Quiz, QuizInput::Skip) => self.skip(),
            (Screen::Results, QuizInput::ShowReview) => {
                self.screen = Screen::Review;
                Ok(())
            }
            (Screen::Review, QuizInput::BackToResults) => {
                self.screen = Screen::Results;
                Ok(())
            }
            (_, QuizInput::Restart) => {
                tracing::info!("quiz restarted");
                self.start();
                Ok(())
            }
            (screen, input) => {
                tracing::debug!(?input, ?screen, "input ignored");
                Ok(())
            }
        }
    }

    /// Handle a wakeup from the timer task. Events from a cancelled task
    /// are dropped.
    pub fn handle_timer(&mut self, event: TimerEvent) -> Result<()> {
        if !self.scheduler.is_current(event.task_id()) {
            tracing::trace!(?event, "stale timer event dropped");
            return Ok(());
        }

        match event {
            TimerEvent::Tick(_) => match self.countdown.tick() {
                TickOutcome::Running(_) | TickOutcome::Inactive => Ok(()),
                TickOutcome::Expired => {
                    tracing::debug!(question = self.progress().0, "question timed out");
                    self.scheduler.cancel();
                    if !self.engine.current_resolved() {
                        self.engine.resolve_current(None)?;
                    }
                    self.advance()
                }
            },
            TimerEvent::AdvanceDue(id) => {
                self.scheduler.complete(id);
                self.advance()
            }
        }
    }

    fn select(&mut self, text: String) -> Result<()> {
        // Only the first selection counts
        if self.engine.current_resolved() {
            tracing::debug!(%text, "selection after resolution ignored");
            return Ok(());
        }

        if !self.presented.iter().any(|o| o.text == text) {
            return Err(QuizError::UnknownOption(text));
        }

        self.scheduler.cancel();
        self.countdown.stop();
        let outcome = self.engine.resolve_current(Some(&text))?;
        let correct_answer = self
            .engine
            .current_question()
            .map(|q| q.correct_answer.clone())
            .unwrap_or_default();
        self.feedback = Some(Feedback {
            selected: text,
            outcome,
            correct_answer,
        });
        self.scheduler.defer_advance(self.feedback_delay);
        Ok(())
    }

    fn skip(&mut self) -> Result<()> {
        self.scheduler.cancel();
        self.countdown.stop();
        if !self.engine.current_resolved() {
            self.engine.resolve_current(None)?;
        }
        self.advance()
    }

    fn advance(&mut self) -> Result<()> {
        self.scheduler.cancel();
        self.countdown.stop();
        match self.engine.advance()? {
            Phase::Active(_) => self.present_current(),
            Phase::Finished => {
                self.feedback = None;
                self.screen = Screen::Results;
            }
        }
        Ok(())
    }

    fn present_current(&mut self) {
        self.feedback = None;
        if let Some(question) = self.engine.current_question() {
            self.presented =
                PresentedOptions::present(question, self.shuffle_options, &mut self.rng);
            self.countdown.restart();
            self.scheduler.start_countdown(self.tick_interval);
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn session(&self) -> &SessionState {
        self.engine.session()
    }

    pub fn question(&self) -> Option<&Question> {
        self.engine.current_question()
    }

    pub fn presented(&self) -> &PresentedOptions {
        &self.presented
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Whether further selections on this question will be ignored
    pub fn is_locked(&self) -> bool {
        self.engine.current_resolved()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Countdown units left times the tick length
    pub fn remaining_time(&self) -> Duration {
        self.tick_interval.saturating_mul(self.countdown.remaining())
    }

    pub fn score(&self) -> f64 {
        self.engine.session().score
    }

    /// 1-based number of the question on screen and the bank size
    pub fn progress(&self) -> (usize, usize) {
        let total = self.engine.total();
        let shown = (self.engine.session().current_index + 1).min(total);
        (shown, total)
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.engine.summary()
    }

    pub fn transcript(&self) -> Vec<ReviewEntry> {
        build_transcript(&self.engine.session().answer_log)
    }

    /// Id of the live timer task
    pub fn active_task(&self) -> Option<TaskId> {
        self.scheduler.active_id()
    }

    /// Cancel any pending timer task, e.g. before the app exits
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.countdown.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expected_score;
    use crate::quiz::timer::TaskKind;

    /// Real tasks never fire during a test; events are fed by hand
    fn config() -> QuizConfig {
        QuizConfig::default()
            .with_question_duration(Duration::from_secs(15 * 60))
            .with_tick_interval(Duration::from_secs(60))
            .with_feedback_delay(Duration::from_secs(5))
    }

    fn controller() -> QuizController {
        let (mut controller, _rx) =
            QuizController::with_rng(QuestionBank::builtin(), &config(), SmallRng::seed_from_u64(42));
        controller.start();
        controller
    }

    fn correct(c: &QuizController) -> String {
        c.question().unwrap().correct_answer.clone()
    }

    fn wrong(c: &QuizController) -> String {
        let q = c.question().unwrap();
        q.options.iter().find(|o| **o != q.correct_answer).unwrap().clone()
    }

    fn expire(c: &mut QuizController) {
        let id = c.active_task().expect("countdown running");
        for _ in 0..c.countdown().duration() {
            c.handle_timer(TimerEvent::Tick(id)).unwrap();
        }
    }

    fn fire_advance(c: &mut QuizController) {
        let id = c.active_task().expect("advance pending");
        c.handle_timer(TimerEvent::AdvanceDue(id)).unwrap();
    }

    #[tokio::test]
    async fn test_start_presents_first_question() {
        let c = controller();
        assert_eq!(c.screen(), Screen::Quiz);
        assert_eq!(c.phase(), Phase::Active(0));
        assert_eq!(c.progress(), (1, 8));
        assert_eq!(c.presented().len(), 4);
        assert!(c.countdown().is_active());
        assert_eq!(c.countdown().remaining(), 15);
    }

    #[tokio::test]
    async fn test_selection_defers_advance() {
        let mut c = controller();
        let answer = correct(&c);
        c.dispatch(QuizInput::Select(answer.clone())).unwrap();

        assert_eq!(c.score(), 1.0);
        assert!(c.is_locked());
        assert!(!c.countdown().is_active());
        assert_eq!(c.phase(), Phase::Active(0));
        let feedback = c.feedback().unwrap();
        assert_eq!(feedback.selected, answer);
        assert_eq!(feedback.outcome, Outcome::Correct);

        fire_advance(&mut c);
        assert_eq!(c.phase(), Phase::Active(1));
        assert!(c.feedback().is_none());
        assert!(c.countdown().is_active());
    }

    #[tokio::test]
    async fn test_second_selection_is_ignored() {
        let mut c = controller();
        let w = wrong(&c);
        let r = correct(&c);
        c.dispatch(QuizInput::Select(w)).unwrap();
        c.dispatch(QuizInput::Select(r)).unwrap();

        assert_eq!(c.session().incorrect_count, 1);
        assert_eq!(c.session().correct_count, 0);
        assert_eq!(c.session().answer_log.len(), 1);
        assert_eq!(c.score(), -0.25);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_skip() {
        let mut c = controller();
        let first = c.active_task().unwrap();
        expire(&mut c);

        assert_eq!(c.phase(), Phase::Active(1));
        assert_eq!(c.session().skipped_count, 1);
        assert_eq!(c.score(), 0.0);
        assert_eq!(c.session().answer_log[0].user_answer, None);
        assert_ne!(c.active_task(), Some(first));
        assert_eq!(c.countdown().remaining(), 15);
    }

    #[tokio::test]
    async fn test_timeout_and_skip_score_identically() {
        let mut timed_out = controller();
        expire(&mut timed_out);

        let mut skipped = controller();
        skipped.dispatch(QuizInput::Skip).unwrap();

        assert_eq!(timed_out.score(), skipped.score());
        assert_eq!(timed_out.session().skipped_count, skipped.session().skipped_count);
        assert_eq!(timed_out.phase(), skipped.phase());
        assert_eq!(
            timed_out.session().answer_log[0].user_answer,
            skipped.session().answer_log[0].user_answer
        );
    }

    #[tokio::test]
    async fn test_stale_countdown_cannot_resolve_after_selection() {
        let mut c = controller();
        let countdown_id = c.active_task().unwrap();
        let answer = correct(&c);
        c.dispatch(QuizInput::Select(answer)).unwrap();
        assert_eq!(c.scheduler.active_kind(), Some(TaskKind::DeferredAdvance));

        for _ in 0..100 {
            c.handle_timer(TimerEvent::Tick(countdown_id)).unwrap();
        }
        assert_eq!(c.session().resolved_count(), 1);
        assert_eq!(c.phase(), Phase::Active(0));
        assert_eq!(c.score(), 1.0);
    }

    #[tokio::test]
    async fn test_skip_during_feedback_moves_on_without_second_record() {
        let mut c = controller();
        let answer = wrong(&c);
        c.dispatch(QuizInput::Select(answer)).unwrap();
        let pending = c.active_task().unwrap();

        c.dispatch(QuizInput::Skip).unwrap();
        assert_eq!(c.phase(), Phase::Active(1));
        assert_eq!(c.session().answer_log.len(), 1);
        assert_eq!(c.session().skipped_count, 0);

        // The cancelled deferred advance must not skip question 2
        c.handle_timer(TimerEvent::AdvanceDue(pending)).unwrap();
        assert_eq!(c.phase(), Phase::Active(1));
    }

    #[tokio::test]
    async fn test_restart_during_feedback_window() {
        let mut c = controller();
        let answer = correct(&c);
        c.dispatch(QuizInput::Select(answer)).unwrap();
        let pending = c.active_task().unwrap();

        c.dispatch(QuizInput::Restart).unwrap();
        c.handle_timer(TimerEvent::AdvanceDue(pending)).unwrap();

        assert_eq!(c.phase(), Phase::Active(0));
        assert_eq!(c.score(), 0.0);
        assert!(c.session().answer_log.is_empty());
        assert!(!c.is_locked());
    }

    #[tokio::test]
    async fn test_full_run_review_and_restart() {
        let mut c = controller();
        // 5 correct, 2 incorrect, 1 skipped
        for step in ["c", "w", "c", "s", "c", "c", "w", "c"] {
            match step {
                "c" => {
                    let a = correct(&c);
                    c.dispatch(QuizInput::Select(a)).unwrap();
                    fire_advance(&mut c);
                }
                "w" => {
                    let a = wrong(&c);
                    c.dispatch(QuizInput::Select(a)).unwrap();
                    fire_advance(&mut c);
                }
                _ => expire(&mut c),
            }
            let s = c.session();
            assert_eq!(s.score, expected_score(s.correct_count, s.incorrect_count, 0.25));
        }

        assert_eq!(c.screen(), Screen::Results);
        assert!(c.active_task().is_none());
        let summary = c.summary().unwrap().clone();
        assert_eq!(summary.score, 4.5);
        assert_eq!((summary.correct_count, summary.incorrect_count, summary.skipped_count), (5, 2, 1));

        // Quiz-only inputs do nothing now
        c.dispatch(QuizInput::Skip).unwrap();
        assert_eq!(c.screen(), Screen::Results);

        c.dispatch(QuizInput::ShowReview).unwrap();
        assert_eq!(c.screen(), Screen::Review);
        let transcript = c.transcript();
        assert_eq!(transcript.len(), 8);
        assert_eq!(transcript[3].user_answer, None);
        assert_eq!(transcript[1].verdict, Outcome::Incorrect);

        c.dispatch(QuizInput::BackToResults).unwrap();
        assert_eq!(c.screen(), Screen::Results);

        c.dispatch(QuizInput::Restart).unwrap();
        assert_eq!(c.screen(), Screen::Quiz);
        assert_eq!(c.phase(), Phase::Active(0));
        assert_eq!(c.score(), 0.0);
        assert_eq!(c.session().resolved_count(), 0);
        assert!(c.transcript().is_empty());
        assert!(c.summary().is_none());
    }

    #[tokio::test]
    async fn test_presented_options_stable_until_next_question() {
        let mut c = controller();
        let before = c.presented().clone();
        let id = c.active_task().unwrap();
        c.handle_timer(TimerEvent::Tick(id)).unwrap();
        assert_eq!(c.presented(), &before);
        assert_eq!(c.countdown().remaining(), 14);
    }

    #[tokio::test]
    async fn test_unknown_option_is_an_error() {
        let mut c = controller();
        assert!(matches!(
            c.dispatch(QuizInput::Select("nope".to_string())),
            Err(QuizError::UnknownOption(_))
        ));
        assert_eq!(c.session().resolved_count(), 0);
        assert!(c.countdown().is_active());
    }

    #[tokio::test]
    async fn test_remaining_time_scales_with_tick_interval() {
        let mut c = controller();
        assert_eq!(c.remaining_time(), Duration::from_secs(15 * 60));
        let id = c.active_task().unwrap();
        c.handle_timer(TimerEvent::Tick(id)).unwrap();
        assert_eq!(c.remaining_time(), Duration::from_secs(14 * 60));
    }
}
