//! Clocks and frame pacing
//!
//! Everything in the simulation is measured against one monotonic millisecond
//! clock. [`SessionClock`] removes paused intervals from it so cooldowns and
//! score stand still while the game is paused.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic millisecond timestamp source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock, zeroed at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Raw clock minus paused time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionClock {
    paused_total_ms: f64,
    paused_at: Option<f64>,
}

impl SessionClock {
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self, raw_ms: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(raw_ms);
        }
    }

    pub fn resume(&mut self, raw_ms: f64) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total_ms += (raw_ms - at).max(0.0);
        }
    }

    /// Session time for a raw timestamp; frozen while paused
    pub fn session_time(&self, raw_ms: f64) -> f64 {
        let effective = self.paused_at.map_or(raw_ms, |at| at.min(raw_ms));
        effective - self.paused_total_ms
    }
}

/// Sleeps out the remainder of each fixed-length frame
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            deadline: None,
        }
    }

    /// No waiting at all (tests, fast headless runs)
    pub fn unthrottled() -> Self {
        Self {
            frame: Duration::ZERO,
            deadline: None,
        }
    }

    /// Block until the current frame's slot has elapsed
    pub fn wait(&mut self) {
        if self.frame.is_zero() {
            return;
        }
        let now = Instant::now();
        let deadline = self.deadline.unwrap_or(now) + self.frame;
        if deadline > now {
            std::thread::sleep(deadline - now);
            self.deadline = Some(deadline);
        } else {
            // Fell behind; don't try to catch up
            self.deadline = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(100.0);
        let handle = clock.clone();
        handle.advance(16.5);
        assert_eq!(clock.now_ms(), 116.5);
        handle.set(5.0);
        assert_eq!(clock.now_ms(), 5.0);
    }

    #[test]
    fn test_session_clock_skips_pauses() {
        let mut clock = SessionClock::default();
        assert_eq!(clock.session_time(1000.0), 1000.0);
        clock.pause(1000.0);
        assert!(clock.is_paused());
        assert_eq!(clock.session_time(4000.0), 1000.0);
        clock.resume(4000.0);
        assert_eq!(clock.session_time(4500.0), 1500.0);

        // Double pause/resume is harmless
        clock.pause(5000.0);
        clock.pause(6000.0);
        clock.resume(7000.0);
        clock.resume(8000.0);
        assert_eq!(clock.session_time(9000.0), 4000.0);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_unthrottled_pacer_returns() {
        let mut pacer = FramePacer::unthrottled();
        for _ in 0..1000 {
            pacer.wait();
        }
    }
}
