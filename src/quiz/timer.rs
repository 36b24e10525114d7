//! Question countdown and cancelable scheduled tasks
//!
//! `Countdown` is the pure per-question counter. `TaskScheduler` owns the
//! single tokio task that produces wakeups for it (or for the deferred
//! advance after an answer). Scheduling anything aborts whatever was in the
//! slot before, and every task is tagged with a fresh `TaskId` so events
//! that were already queued by an aborted task can be recognised and
//! dropped.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Result of advancing the countdown by one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running with this many units left
    Running(u32),
    /// Reached zero on this tick; reported exactly once
    Expired,
    /// Stopped or already expired
    Inactive,
}

/// Countdown for the question on screen
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    active: bool,
}

impl Countdown {
    /// A stopped countdown showing the full duration
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            active: false,
        }
    }

    /// Reset to the full duration and start counting
    pub fn restart(&mut self) {
        self.remaining = self.duration;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.active {
            return TickOutcome::Inactive;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining share of the duration, 1.0 when full
    pub fn fraction_remaining(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            self.remaining as f64 / self.duration as f64
        }
    }
}

/// Identity of one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Wakeups delivered to the app loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One countdown unit elapsed
    Tick(TaskId),
    /// The post-answer pause is over
    AdvanceDue(TaskId),
}

impl TimerEvent {
    pub fn task_id(&self) -> TaskId {
        match self {
            TimerEvent::Tick(id) | TimerEvent::AdvanceDue(id) => *id,
        }
    }
}

/// What the live task is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Countdown,
    DeferredAdvance,
}

#[derive(Debug)]
struct ScheduledTask {
    id: TaskId,
    kind: TaskKind,
    handle: JoinHandle<()>,
}

/// Holds at most one live timer task
#[derive(Debug)]
pub struct TaskScheduler {
    tx: mpsc::UnboundedSender<TimerEvent>,
    current: Option<ScheduledTask>,
    next_id: u64,
}

impl TaskScheduler {
    /// Create a scheduler and the receiver its events arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                current: None,
                next_id: 0,
            },
            rx,
        )
    }

    /// Replace the slot with a task that sends a `Tick` every `period`,
    /// the first one `period` from now
    pub fn start_countdown(&mut self, period: Duration) -> TaskId {
        let id = self.next_task_id();
        let tx = self.tx.clone();
        self.cancel();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(TimerEvent::Tick(id)).is_err() {
                    break;
                }
            }
        });
        self.current = Some(ScheduledTask {
            id,
            kind: TaskKind::Countdown,
            handle,
        });
        id
    }

    /// Replace the slot with a one-shot task that sends `AdvanceDue`
    /// after `delay`
    pub fn defer_advance(&mut self, delay: Duration) -> TaskId {
        let id = self.next_task_id();
        let tx = self.tx.clone();
        self.cancel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerEvent::AdvanceDue(id));
        });
        self.current = Some(ScheduledTask {
            id,
            kind: TaskKind::DeferredAdvance,
            handle,
        });
        id
    }

    /// Abort the live task, if any. Its already-queued events become stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.current.take() {
            task.handle.abort();
            tracing::trace!(id = task.id.0, kind = ?task.kind, "timer task cancelled");
        }
    }

    /// Whether `id` belongs to the live task
    pub fn is_current(&self, id: TaskId) -> bool {
        self.current.as_ref().map_or(false, |t| t.id == id)
    }

    /// Kind of the live task
    pub fn active_kind(&self) -> Option<TaskKind> {
        self.current.as_ref().map(|t| t.kind)
    }

    /// Id of the live task
    pub fn active_id(&self) -> Option<TaskId> {
        self.current.as_ref().map(|t| t.id)
    }

    /// Mark the live one-shot task as spent once its event has been handled
    pub fn complete(&mut self, id: TaskId) {
        if self.is_current(id) {
            self.current = None;
        }
    }

    fn next_task_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
