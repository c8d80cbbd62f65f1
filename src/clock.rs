#[cfg(test)]
use std::sync::{Arc, Mutex};
use std::time::Instant;

use stopwatch_core::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic seconds since the clock was created.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Settable clock for tests. Clones share the same time.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn set(&self, now: Timestamp) {
        *self.now.lock().unwrap() = now;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn test_system_clock_default_starts_near_zero() {
        let clock = SystemClock::default();
        assert!(clock.now() < 60.0);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::default();
        let handle = clock.clone();
        assert_eq!(clock.now(), 0.0);
        handle.set(2.5);
        assert_eq!(clock.now(), 2.5);
    }
}
