//! Pausable elapsed-time clock
//!
//! Elapsed time is always recomputed from absolute readings
//! (`now - start_epoch`), never accumulated tick by tick, so the tick interval
//! only affects display smoothness and never causes drift.

use crate::error::TransitionError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    running: bool,
    /// Reading that corresponds to zero elapsed time for the current run
    /// segment. Signed: resuming at `now < elapsed` puts it before the origin.
    start_epoch: i64,
    elapsed: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed milliseconds as of the last start, stop or tick.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Start or resume. Returns `false` if already running.
    pub fn start(&mut self, now: u64) -> bool {
        if self.running {
            return false;
        }
        self.start_epoch = to_signed(now) - to_signed(self.elapsed);
        self.running = true;
        true
    }

    /// Pause, freezing elapsed at `now`. Returns `false` if already stopped.
    pub fn stop(&mut self, now: u64) -> bool {
        if !self.running {
            return false;
        }
        self.advance_to(now);
        self.running = false;
        true
    }

    /// Recompute elapsed from `now`. Returns `true` if elapsed changed.
    ///
    /// Has no effect while stopped.
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.running {
            return false;
        }
        let before = self.elapsed;
        self.advance_to(now);
        self.elapsed != before
    }

    /// Back to zero. Only allowed while stopped.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.running {
            return Err(TransitionError::ResetWhileRunning);
        }
        *self = Self::default();
        Ok(())
    }

    fn advance_to(&mut self, now: u64) {
        let measured = (to_signed(now) - self.start_epoch).max(0);
        // A reading from before the last one must not move elapsed backwards.
        self.elapsed = self.elapsed.max(measured as u64);
    }
}

fn to_signed(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_stopped_at_zero() {
        let clock = Clock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), 0);
    }

    #[test]
    fn test_start_tick_stop() {
        let mut clock = Clock::new();
        assert!(clock.start(1000));
        assert!(clock.tick(1500));
        assert_eq!(clock.elapsed(), 500);

        assert!(clock.stop(2000));
        assert_eq!(clock.elapsed(), 1000);

        // Frozen while stopped
        assert!(!clock.tick(9000));
        assert_eq!(clock.elapsed(), 1000);
    }

    #[test]
    fn test_resume_continues_from_elapsed() {
        let mut clock = Clock::new();
        clock.start(0);
        clock.stop(1000);

        clock.start(5000);
        clock.tick(5500);
        assert_eq!(clock.elapsed(), 1500);
    }

    #[test]
    fn test_resume_before_origin() {
        // A source that restarted at zero while the clock still holds time
        let mut clock = Clock::new();
        clock.start(0);
        clock.stop(3000);

        clock.start(100);
        clock.tick(600);
        assert_eq!(clock.elapsed(), 3500);
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut single = Clock::new();
        single.start(100);

        let mut double = Clock::new();
        double.start(100);
        assert!(!double.start(400));

        for now in [200, 500, 900] {
            single.tick(now);
            double.tick(now);
            assert_eq!(single.elapsed(), double.elapsed());
        }
    }

    #[test]
    fn test_double_stop_is_noop() {
        let mut clock = Clock::new();
        clock.start(0);
        assert!(clock.stop(700));
        assert!(!clock.stop(900));
        assert_eq!(clock.elapsed(), 700);
    }

    #[test]
    fn test_reset_rejected_while_running() {
        let mut clock = Clock::new();
        clock.start(0);
        clock.tick(250);

        assert_eq!(clock.reset(), Err(TransitionError::ResetWhileRunning));
        assert!(clock.is_running());
        assert_eq!(clock.elapsed(), 250);

        clock.stop(300);
        assert_eq!(clock.reset(), Ok(()));
        assert_eq!(clock, Clock::new());
    }

    #[test]
    fn test_elapsed_never_decreases() {
        let mut clock = Clock::new();
        clock.start(1000);
        clock.tick(1800);
        assert!(!clock.tick(1200));
        assert_eq!(clock.elapsed(), 800);
    }

    #[test]
    fn test_elapsed_monotone_over_mixed_sequence() {
        let mut clock = Clock::new();
        let mut last = 0;
        let steps: [(&str, u64); 8] = [
            ("start", 10),
            ("tick", 40),
            ("stop", 55),
            ("tick", 90),
            ("start", 100),
            ("tick", 130),
            ("stop", 200),
            ("tick", 400),
        ];
        for (op, now) in steps {
            let was_running = clock.is_running();
            let before = clock.elapsed();
            match op {
                "start" => {
                    clock.start(now);
                }
                "stop" => {
                    clock.stop(now);
                }
                _ => {
                    clock.tick(now);
                }
            }
            assert!(clock.elapsed() >= last);
            if !was_running && op == "tick" {
                assert_eq!(clock.elapsed(), before);
            }
            last = clock.elapsed();
        }
        assert_eq!(clock.elapsed(), 45 + 100);
    }
}
