use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// Minute-resolution simulation clock.
///
/// Only the driver advances the clock; barbers read it concurrently to
/// timestamp waits, so the current minute is kept in an atomic.
#[derive(Debug)]
pub struct SimulationClock {
    current: AtomicU64,
    total: u64,
    /// Simulated minutes per wall-clock second
    pace_factor: f64,
}

impl SimulationClock {
    pub fn new(total: u64, pace_factor: f64) -> Self {
        Self {
            current: AtomicU64::new(0),
            total,
            pace_factor,
        }
    }

    /// Sleep for one paced minute, then advance by one minute
    pub fn tick(&self) {
        thread::sleep(scaled(1.0, self.pace_factor));
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// True while simulated time remains
    pub fn is_live(&self) -> bool {
        self.current() < self.total
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pace_factor(&self) -> f64 {
        self.pace_factor
    }

    pub fn reset(&self) {
        self.current.store(0, Ordering::Release);
    }

    pub fn format(&self) -> String {
        format!("{} min", self.current())
    }
}

/// Wall-clock duration of `minutes` simulated minutes at `pace_factor`
pub fn scaled(minutes: f64, pace_factor: f64) -> Duration {
    Duration::from_secs_f64((minutes / pace_factor).max(0.0))
}
