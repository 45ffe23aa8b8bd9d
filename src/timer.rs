//! Host-driven timers.
//!
//! The engines never read a clock. The host reports elapsed wall time via
//! `advance`, and the timers turn it into callback firings. Every timer has
//! an explicit cancel path, and a cancelled timer never fires again.

/// Timer run state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Stopped,
    /// Permanently cancelled. `start` has no effect.
    Cancelled,
}

/// A repeating timer with a fixed period (`setInterval`-style).
///
/// Elapsed time that does not complete a period is carried to the next
/// `advance`, so firing counts are exact across uneven host frames.
#[derive(Clone, Debug)]
pub struct RepeatingTimer {
    period_ms: u64,
    carried_ms: u64,
    state: TimerState,
}

impl RepeatingTimer {
    /// Create a stopped timer. A zero period is raised to 1ms.
    #[must_use]
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            carried_ms: 0,
            state: TimerState::Stopped,
        }
    }

    #[must_use]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Start (or restart) the timer from a fresh period.
    pub fn start(&mut self) {
        if self.state != TimerState::Cancelled {
            self.state = TimerState::Running;
            self.carried_ms = 0;
        }
    }

    /// Stop the timer, discarding the partial period.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
        self.carried_ms = 0;
    }

    /// Cancel the timer for good.
    pub fn cancel(&mut self) {
        self.state = TimerState::Cancelled;
        self.carried_ms = 0;
    }

    /// Report elapsed time and return how many periods completed.
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        if self.state != TimerState::Running {
            return 0;
        }
        let total = self.carried_ms.saturating_add(elapsed_ms);
        self.carried_ms = total % self.period_ms;
        total / self.period_ms
    }
}

/// A cancellable single-shot deadline (`setTimeout`-style).
#[derive(Clone, Debug, Default)]
pub struct OneShot {
    remaining_ms: Option<u64>,
}

impl OneShot {
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining_ms: None }
    }

    /// Arm the deadline, replacing any pending one.
    pub fn arm(&mut self, delay_ms: u64) {
        self.remaining_ms = Some(delay_ms);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Time left before the deadline fires, if armed.
    #[must_use]
    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    /// Report elapsed time. Returns `true` exactly once, when the deadline passes.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        match self.remaining_ms {
            Some(remaining) if elapsed_ms >= remaining => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - elapsed_ms);
                false
            }
            None => false,
        }
    }
}
