//! Animation scheduling
//!
//! Replaces ad hoc interval timers with a single repeating-task slot. Starting
//! a task cancels whatever was running, and every task is identified by a
//! handle, so a stale handle can never stop the task that replaced it.

use serde::{Deserialize, Serialize};

/// Maximum ticks released by one `advance` call to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 8;

/// Which animation a task drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Charge,
    Jump,
}

/// Identifies one started task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle {
    id: u64,
    pub animation: Animation,
}

/// Fixed-period repeating task slot with a time accumulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    period_ms: f32,
    accumulator: f32,
    running: Option<TimerHandle>,
    next_id: u64,
}

impl Scheduler {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(f32::EPSILON),
            accumulator: 0.0,
            running: None,
            next_id: 1,
        }
    }

    #[inline]
    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Start a repeating task, cancelling any running one
    pub fn start(&mut self, animation: Animation) -> TimerHandle {
        if let Some(previous) = self.running.take() {
            log::debug!("Replacing {:?} timer {}", previous.animation, previous.id);
        }
        let handle = TimerHandle {
            id: self.next_id,
            animation,
        };
        self.next_id += 1;
        self.accumulator = 0.0;
        self.running = Some(handle);
        handle
    }

    /// Cancel the task behind `handle`; returns false if it was no longer running
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self.running == Some(handle) {
            self.running = None;
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    /// Cancel whatever is running
    pub fn cancel_all(&mut self) {
        self.running = None;
        self.accumulator = 0.0;
    }

    #[inline]
    pub fn running(&self) -> Option<TimerHandle> {
        self.running
    }

    #[inline]
    pub fn is_running(&self, animation: Animation) -> bool {
        self.running.is_some_and(|h| h.animation == animation)
    }

    /// Accumulate elapsed time and return how many ticks are due
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if self.running.is_none() {
            return 0;
        }
        self.accumulator += elapsed_ms.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.period_ms && due < MAX_SUBSTEPS {
            self.accumulator -= self.period_ms;
            due += 1;
        }
        // Drop backlog we refused to run
        if due == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.period_ms);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_scheduler_releases_nothing() {
        let mut scheduler = Scheduler::new(20.0);
        assert_eq!(scheduler.advance(1000.0), 0);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut scheduler = Scheduler::new(20.0);
        scheduler.start(Animation::Charge);
        assert_eq!(scheduler.advance(15.0), 0);
        assert_eq!(scheduler.advance(15.0), 1);
        assert_eq!(scheduler.advance(30.0), 2);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut scheduler = Scheduler::new(20.0);
        scheduler.start(Animation::Jump);
        assert_eq!(scheduler.advance(10_000.0), MAX_SUBSTEPS);
        assert!(scheduler.advance(0.0) <= 1);
    }

    #[test]
    fn test_start_replaces_running_task() {
        let mut scheduler = Scheduler::new(20.0);
        let charge = scheduler.start(Animation::Charge);
        let jump = scheduler.start(Animation::Jump);
        assert_ne!(charge, jump);
        assert!(scheduler.is_running(Animation::Jump));
        assert!(!scheduler.is_running(Animation::Charge));
    }

    #[test]
    fn test_stale_handle_cannot_cancel() {
        let mut scheduler = Scheduler::new(20.0);
        let first = scheduler.start(Animation::Charge);
        let second = scheduler.start(Animation::Charge);
        assert!(!scheduler.cancel(first));
        assert_eq!(scheduler.running(), Some(second));
        assert!(scheduler.cancel(second));
        assert_eq!(scheduler.running(), None);
    }
}
