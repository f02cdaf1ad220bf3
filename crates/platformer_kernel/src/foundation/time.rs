//! Time management utilities

use std::time::{Duration, Instant};

/// Clamp a raw frame delta before handing it to the kernel
///
/// Long stalls are capped at `nominal * max_multiple`; negative or NaN
/// deltas become zero, which makes the step a no-op.
pub fn clamp_delta(dt: f32, nominal: f32, max_multiple: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(nominal * max_multiple)
}

/// Frame clock for the simulation loop
///
/// Counts frames and accumulates simulated time from clamped deltas, so
/// `total_time` is the time the kernel actually saw.
#[derive(Debug, Clone)]
pub struct FrameClock {
    nominal_dt: f32,
    max_multiple: f32,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock for the given nominal step
    pub fn new(nominal_dt: f32, max_multiple: f32) -> Self {
        Self {
            nominal_dt,
            max_multiple,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by a raw frame delta, returning the clamped delta
    pub fn tick(&mut self, raw_dt: f32) -> f32 {
        self.delta_time = clamp_delta(raw_dt, self.nominal_dt, self.max_multiple);
        self.total_time += f64::from(self.delta_time);
        self.frame_count += 1;
        self.delta_time
    }

    /// Clamped delta of the last tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total simulated time in seconds
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Nominal fixed step in seconds
    pub fn nominal_dt(&self) -> f32 {
        self.nominal_dt
    }
}

/// Simple stopwatch for measuring wall-clock time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}
