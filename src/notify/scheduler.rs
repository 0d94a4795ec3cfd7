//! Time-ordered task queue.
//!
//! Tasks are plain values scheduled at an offset from the clock's origin.
//! Nothing runs on its own: the owner pops whatever is due for a given
//! instant, which keeps timer behavior deterministic under a manual clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct ScheduledTask<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for ScheduledTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for ScheduledTask<T> {}

impl<T> PartialOrd for ScheduledTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed: BinaryHeap is a max-heap and the earliest task must come out first.
impl<T> Ord for ScheduledTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Queue of tasks ordered by due time, then by scheduling order.
#[derive(Debug)]
pub struct TaskQueue<T> {
    heap: BinaryHeap<ScheduledTask<T>>,
    next_seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to become due at `due`.
    pub fn schedule(&mut self, due: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(ScheduledTask { due, seq, task });
    }

    /// Removes and returns every task due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Duration) -> Vec<(Duration, T)> {
        let mut due = Vec::new();
        while self.heap.peek().map_or(false, |t| t.due <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push((entry.due, entry.task));
            }
        }
        due
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
