//! Transient on-screen notifications.
//!
//! A notification is inserted in the `Entering` phase and becomes `Visible`
//! after the show delay. The visible period is timed from insertion: once
//! it is over the notification starts `Leaving`, and it is removed after
//! the fade-out. With the default timings that is visible at 100 ms,
//! leaving at 3000 ms and gone at 3300 ms.
//!
//! Every notification owns its own three timers; concurrent notifications
//! stack and expire independently, nothing is coalesced. Timers are entries
//! in a [`TaskQueue`] evaluated against a [`Clock`], so tests can drive them
//! with a [`ManualClock`] while applications run [`NotificationCenter::run`]
//! on a tokio runtime.

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::TaskQueue;

use crate::config::NotificationTimings;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;

/// Severity tag of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    /// Inserted, waiting for the show delay.
    Entering,
    /// Fully shown.
    Visible,
    /// Fading out, about to be removed.
    Leaving,
}

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    pub phase: NotificationPhase,
    /// Clock offset at insertion.
    pub created_at: Duration,
}

#[derive(Debug, Clone, Copy)]
enum Transition {
    Show(u64),
    FadeOut(u64),
    Remove(u64),
}

type Listener = Box<dyn Fn(&Notification) + Send + Sync>;

struct CenterState {
    next_id: u64,
    active: Vec<Notification>,
    timers: TaskQueue<Transition>,
}

/// Owner of the on-screen notification stack.
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    timings: NotificationTimings,
    state: Mutex<CenterState>,
    listeners: Mutex<Vec<Listener>>,
    wakeup: Notify,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("timings", &self.timings)
            .field("active", &self.lock_state().active.len())
            .finish()
    }
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>, timings: NotificationTimings) -> Self {
        Self {
            clock,
            timings,
            state: Mutex::new(CenterState {
                next_id: 1,
                active: Vec::new(),
                timers: TaskQueue::new(),
            }),
            listeners: Mutex::new(Vec::new()),
            wakeup: Notify::new(),
        }
    }

    /// Center running on wall-clock time.
    pub fn with_system_clock(timings: NotificationTimings) -> Self {
        Self::new(Arc::new(SystemClock::new()), timings)
    }

    fn lock_state(&self) -> MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Registers a callback invoked for every new notification.
    ///
    /// Callbacks run synchronously inside [`show`](Self::show) and must not
    /// call back into the center.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Box::new(listener));
    }

    /// Puts a message on screen and schedules its lifecycle.
    ///
    /// # Returns
    ///
    /// The id of the new notification.
    pub fn show(&self, message: impl Into<String>, level: NotificationLevel) -> u64 {
        let now = self.clock.now();
        let notification = {
            let mut state = self.lock_state();
            Self::apply_due(&mut state, now);

            let id = state.next_id;
            state.next_id += 1;

            let shown = now + self.timings.show_delay();
            let leaving = now + self.timings.visible();
            let removed = leaving + self.timings.fade_out();
            state.timers.schedule(shown, Transition::Show(id));
            state.timers.schedule(leaving, Transition::FadeOut(id));
            state.timers.schedule(removed, Transition::Remove(id));

            let notification = Notification {
                id,
                message: message.into(),
                level,
                phase: NotificationPhase::Entering,
                created_at: now,
            };
            state.active.push(notification.clone());
            notification
        };

        info!(
            "[{}] {} (notification {})",
            notification.level, notification.message, notification.id
        );
        for listener in self
            .listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
        {
            listener(&notification);
        }
        self.wakeup.notify_one();
        notification.id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationLevel::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationLevel::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationLevel::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationLevel::Error)
    }

    /// Applies every transition due at the clock's current time.
    ///
    /// # Returns
    ///
    /// The number of transitions applied.
    pub fn tick(&self) -> usize {
        let now = self.clock.now();
        let mut state = self.lock_state();
        Self::apply_due(&mut state, now)
    }

    fn apply_due(state: &mut CenterState, now: Duration) -> usize {
        let due = state.timers.pop_due(now);
        let applied = due.len();
        for (_, transition) in due {
            match transition {
                Transition::Show(id) => Self::advance_phase(
                    state,
                    id,
                    NotificationPhase::Entering,
                    NotificationPhase::Visible,
                ),
                Transition::FadeOut(id) => {
                    if let Some(n) = state.active.iter_mut().find(|n| n.id == id) {
                        n.phase = NotificationPhase::Leaving;
                    }
                }
                Transition::Remove(id) => {
                    state.active.retain(|n| n.id != id);
                    debug!("Notification {} removed", id);
                }
            }
        }
        applied
    }

    // Phases only move forward.
    fn advance_phase(
        state: &mut CenterState,
        id: u64,
        from: NotificationPhase,
        to: NotificationPhase,
    ) {
        if let Some(n) = state.active.iter_mut().find(|n| n.id == id && n.phase == from) {
            n.phase = to;
        }
    }

    /// Notifications on screen, oldest first, after applying due timers.
    pub fn active(&self) -> Vec<Notification> {
        let now = self.clock.now();
        let mut state = self.lock_state();
        Self::apply_due(&mut state, now);
        state.active.clone()
    }

    /// Looks up one notification by id, after applying due timers.
    pub fn get(&self, id: u64) -> Option<Notification> {
        self.active().into_iter().find(|n| n.id == id)
    }

    /// Clock offset of the next pending transition.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.lock_state().timers.next_due()
    }

    pub fn timings(&self) -> NotificationTimings {
        self.timings
    }

    /// Drives the timers in real time until the task is aborted.
    ///
    /// Sleeps until the next deadline, waking early when a new notification
    /// is shown. Intended to be spawned once per session with a
    /// [`SystemClock`]-backed center.
    pub async fn run(self: Arc<Self>) {
        loop {
            match self.next_deadline() {
                Some(deadline) => {
                    let now = self.clock.now();
                    if deadline > now {
                        tokio::select! {
                            _ = tokio::time::sleep(deadline - now) => {}
                            _ = self.wakeup.notified() => {}
                        }
                    }
                    self.tick();
                }
                None => self.wakeup.notified().await,
            }
        }
    }
}
