//! Cooperative single-threaded timers on a caller-driven millisecond clock.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use motes_core::ElementId;

/// Work a timer hands back to the scene when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Emit one floating particle.
    EmitParticle,
    /// Emit one glowing orb.
    EmitOrb,
    /// Detach an ephemeral element.
    Remove(ElementId),
}

/// Handle for cancelling a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    due_ms: u64,
    id: TimerId,
    job: Job,
    period_ms: Option<u64>,
}

impl Timer {
    fn key(&self) -> (u64, TimerId) {
        (self.due_ms, self.id)
    }
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Timer queue plus a "next frame" request flag.
///
/// Nothing runs on its own: the host calls [`Scheduler::pop_due`] with the
/// current time and executes whatever comes back. Due timers come out in due
/// order, ties in the order they were scheduled.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Timer>>,
    next_id: u64,
    now_ms: u64,
    frame_requested: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest time seen by [`Scheduler::pop_due`].
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `job` once, `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u64, job: Job) -> TimerId {
        self.push(self.now_ms.saturating_add(delay_ms), job, None)
    }

    /// Run `job` every `period_ms`, first one period from now.
    pub fn every(&mut self, period_ms: u64, job: Job) -> TimerId {
        let period_ms = period_ms.max(1);
        self.push(self.now_ms.saturating_add(period_ms), job, Some(period_ms))
    }

    /// Drop a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|Reverse(timer)| timer.id != id);
        self.queue.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.iter().any(|Reverse(timer)| timer.id == id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Ask for one frame on the next advance.
    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    /// Consume the pending frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Move the clock to `now_ms` and pop the next due job.
    ///
    /// The clock never runs backwards. A periodic timer is put back one period
    /// after its due time, or one period after `now_ms` when the host fell a
    /// whole period behind, so a starved timer fires once rather than
    /// replaying every missed period.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Job> {
        self.now_ms = self.now_ms.max(now_ms);

        if self.queue.peek()?.0.due_ms > self.now_ms {
            return None;
        }
        let Reverse(timer) = self.queue.pop()?;

        if let Some(period_ms) = timer.period_ms {
            let mut next_due = timer.due_ms.saturating_add(period_ms);
            if next_due <= self.now_ms {
                next_due = self.now_ms.saturating_add(period_ms);
            }
            self.queue.push(Reverse(Timer {
                due_ms: next_due,
                ..timer.clone()
            }));
        }

        Some(timer.job)
    }

    fn push(&mut self, due_ms: u64, job: Job, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Timer {
            due_ms,
            id,
            job,
            period_ms,
        }));
        id
    }
}
