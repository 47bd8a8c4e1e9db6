//! Return-to-neutral timer
//!
//! Two states:
//! - `Idle`: actuator at neutral, nothing pending
//! - `Armed`: actuator at a bin, dwell running since `since_ms`
//!
//! Arming while already armed restarts the dwell; there is never more than
//! one pending return. The timer only reports that the dwell has elapsed;
//! moving the actuator back is the caller's job.

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// No return pending
    Idle,
    /// Return pending; dwell started at `since_ms`
    Armed { since_ms: u64 },
}

/// Dwell timer for the automatic return to neutral
#[derive(Debug, Clone)]
pub struct ReturnTimer {
    /// Dwell duration (ms)
    dwell_ms: u32,
    /// Current state
    state: TimerState,
}

impl ReturnTimer {
    /// Create an idle timer
    pub const fn new(dwell_ms: u32) -> Self {
        Self {
            dwell_ms,
            state: TimerState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Check if a return is pending
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// Start (or restart) the dwell at `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.state = TimerState::Armed { since_ms: now_ms };
    }

    /// Drop any pending return
    pub fn disarm(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Check the dwell
    ///
    /// Returns `true` exactly once per armed period, on the first call where
    /// the elapsed time exceeds the dwell. The timer is idle afterwards.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let TimerState::Armed { since_ms } = self.state else {
            return false;
        };

        // A clock reading before `since_ms` counts as no time elapsed
        let elapsed = now_ms.saturating_sub(since_ms);
        if elapsed > u64::from(self.dwell_ms) {
            self.state = TimerState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DWELL: u32 = 3000;

    #[test]
    fn test_starts_idle() {
        let mut timer = ReturnTimer::new(DWELL);
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(!timer.poll(u64::MAX));
    }

    #[test]
    fn test_fires_after_dwell() {
        let mut timer = ReturnTimer::new(DWELL);
        timer.arm(1000);

        assert!(!timer.poll(1000));
        assert!(!timer.poll(4000)); // exactly the dwell: not yet exceeded
        assert!(timer.poll(4001));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_fires_once() {
        let mut timer = ReturnTimer::new(DWELL);
        timer.arm(0);

        assert!(timer.poll(10_000));
        assert!(!timer.poll(10_001));
        assert!(!timer.poll(50_000));
    }

    #[test]
    fn test_rearm_restarts_dwell() {
        let mut timer = ReturnTimer::new(DWELL);
        timer.arm(0);
        timer.arm(2000);

        assert_eq!(timer.state(), TimerState::Armed { since_ms: 2000 });
        // Would have fired for the first arm, but that window was replaced
        assert!(!timer.poll(3500));
        assert!(timer.poll(5001));
        assert!(!timer.poll(9000));
    }

    #[test]
    fn test_disarm() {
        let mut timer = ReturnTimer::new(DWELL);
        timer.arm(0);
        timer.disarm();

        assert!(!timer.is_armed());
        assert!(!timer.poll(10_000));
    }

    #[test]
    fn test_longest_dwell() {
        let mut timer = ReturnTimer::new(u32::MAX);
        timer.arm(0);

        assert!(!timer.poll(u64::from(u32::MAX)));
        assert!(timer.poll(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_clock_behind_arm_time() {
        let mut timer = ReturnTimer::new(DWELL);
        timer.arm(5000);

        assert!(!timer.poll(0));
        assert!(timer.is_armed());
    }
}
