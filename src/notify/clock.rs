//! Clocks driving the notification timers.
//!
//! Time is measured as an offset from the clock's creation.

use std::sync::Mutex;
use std::time::Duration;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Elapsed time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time.
///
/// Backed by `tokio::time::Instant`, so a paused tokio runtime also pauses
/// this clock.
#[derive(Debug)]
pub struct SystemClock {
    origin: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }

    /// Sets the clock to an absolute offset. Going backwards is ignored.
    pub fn set(&self, to: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        if to > *now {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_forward() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(150));
        clock.set(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(150));

        clock.set(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_follows_paused_runtime() {
        let clock = SystemClock::new();
        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(clock.now() >= Duration::from_millis(500));
    }
}
