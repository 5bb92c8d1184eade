//! Turn countdown timer
//!
//! Counts whole seconds down to zero. Time is fed in by the caller through
//! [`TurnTimer::advance`], so a paused timer simply ignores elapsed time and
//! resumes from the exact sub-second position it was frozen at.

use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Notification produced while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; `remaining` seconds are left (always > 0).
    Tick { remaining: u32 },
    /// The countdown reached zero.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct TurnTimer {
    duration: u32,
    remaining: u32,
    /// Time accumulated toward the next whole second.
    carry: Duration,
    state: TimerState,
}

impl TurnTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            carry: Duration::ZERO,
            state: TimerState::Idle,
        }
    }

    /// Start counting. Only valid from idle; a zero-length timer expires at once.
    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Idle {
            return None;
        }
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            return Some(TimerEvent::Expired);
        }
        self.state = TimerState::Running;
        None
    }

    /// Freeze the countdown. Returns true if the timer was running.
    pub fn pause(&mut self) -> bool {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
            true
        } else {
            false
        }
    }

    /// Continue from the frozen value. Returns true if the timer was paused.
    pub fn resume(&mut self) -> bool {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
            true
        } else {
            false
        }
    }

    /// Halt without expiring, e.g. when the words run out first.
    pub fn stop(&mut self) {
        if matches!(self.state, TimerState::Running | TimerState::Paused) {
            self.state = TimerState::Stopped;
        }
    }

    /// Feed elapsed wall time. Emits one event per whole second crossed.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.state != TimerState::Running {
            return events;
        }

        self.carry += elapsed;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.state = TimerState::Expired;
                self.carry = Duration::ZERO;
                events.push(TimerEvent::Expired);
                break;
            }
            events.push(TimerEvent::Tick {
                remaining: self.remaining,
            });
        }
        events
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    /// Fraction of the budget still left, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        f64::from(self.remaining) / f64::from(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_idle_timer_ignores_time() {
        let mut timer = TurnTimer::new(5);
        assert!(timer.advance(secs(3)).is_empty());
        assert_eq!(timer.remaining(), 5);
    }

    #[test]
    fn test_ticks_each_second() {
        let mut timer = TurnTimer::new(5);
        timer.start();
        assert_eq!(timer.advance(secs(1)), vec![TimerEvent::Tick { remaining: 4 }]);
        assert_eq!(
            timer.advance(secs(2)),
            vec![
                TimerEvent::Tick { remaining: 3 },
                TimerEvent::Tick { remaining: 2 }
            ]
        );
        assert_eq!(timer.remaining(), 2);
    }

    #[test]
    fn test_expires_at_zero() {
        let mut timer = TurnTimer::new(2);
        timer.start();
        assert_eq!(
            timer.advance(secs(5)),
            vec![TimerEvent::Tick { remaining: 1 }, TimerEvent::Expired]
        );
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);
        assert!(timer.advance(secs(1)).is_empty());
    }

    #[test]
    fn test_sub_second_accumulation() {
        let mut timer = TurnTimer::new(10);
        timer.start();
        assert!(timer.advance(millis(400)).is_empty());
        assert!(timer.advance(millis(500)).is_empty());
        assert_eq!(timer.advance(millis(100)), vec![TimerEvent::Tick { remaining: 9 }]);
    }

    #[test]
    fn test_pause_freezes_exactly() {
        let mut timer = TurnTimer::new(10);
        timer.start();
        timer.advance(millis(1700));
        assert_eq!(timer.remaining(), 9);

        assert!(timer.pause());
        assert!(timer.advance(secs(30)).is_empty());
        assert_eq!(timer.remaining(), 9);

        assert!(timer.resume());
        // 700ms were already banked before the pause
        assert!(timer.advance(millis(299)).is_empty());
        assert_eq!(timer.advance(millis(1)), vec![TimerEvent::Tick { remaining: 8 }]);
    }

    #[test]
    fn test_pause_resume_only_from_valid_states() {
        let mut timer = TurnTimer::new(3);
        assert!(!timer.pause());
        assert!(!timer.resume());
        timer.start();
        assert!(!timer.resume());
        assert!(timer.pause());
        assert!(!timer.pause());
    }

    #[test]
    fn test_stop_keeps_remaining() {
        let mut timer = TurnTimer::new(30);
        timer.start();
        timer.advance(secs(18));
        timer.stop();
        assert_eq!(timer.remaining(), 12);
        assert!(timer.advance(secs(5)).is_empty());
    }

    #[test]
    fn test_zero_duration_expires_on_start() {
        let mut timer = TurnTimer::new(0);
        assert_eq!(timer.start(), Some(TimerEvent::Expired));
        assert!(!timer.is_running());
        assert!(!timer.resume());
    }

    #[test]
    fn test_progress() {
        let mut timer = TurnTimer::new(4);
        timer.start();
        timer.advance(secs(1));
        assert!((timer.progress() - 0.75).abs() < f64::EPSILON);
    }
}
