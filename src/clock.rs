//! Time sources for the frame pipeline
//!
//! Timing components never read the wall clock themselves. They take a
//! millisecond timestamp per call; the engine reads one of these clocks
//! once per frame and passes the value down.

use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use std::time::Instant;

/// Monotonic millisecond time source
pub trait Clock: Send + Sync {
    /// Milliseconds since the clock's origin
    fn now_ms(&self) -> f64;
}

/// Process clock measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start_time: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
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
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<ParkingMutex<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Arc::new(ParkingMutex::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        *self.now_ms.lock() = now_ms;
    }

    pub fn advance(&self, delta_ms: f64) {
        *self.now_ms.lock() += delta_ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        *self.now_ms.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(100.0);
        let view = clock.clone();
        clock.advance(50.0);
        assert_eq!(view.now_ms(), 150.0);
        view.set(10.0);
        assert_eq!(clock.now_ms(), 10.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
