//! Timing utilities shared by the benchmarking crates
//!
//! This module provides a stopwatch ([`Timer`]), human-readable formatting of
//! nanosecond durations and a standard event for reporting a timed run.
//!
//! ## Example
//!
//! ```rust
//! use counted_float_tracing::performance::{format_time_durations, Timer};
//!
//! let mut timer = Timer::started();
//! // ... do work ...
//! timer.stop();
//! assert!(timer.elapsed_nsec().is_ok());
//!
//! assert_eq!(format_time_durations(100.0, 200.0, 400.0), " 200.00 ns ±  150.00 ns");
//! ```

use std::fmt;
use std::time::{Duration, Instant};

/// Errors raised by [`Timer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// Elapsed time was requested before the timer was started.
    #[error("timer has not been started")]
    NotStarted,
}

/// Stopwatch measuring wall-clock time with [`Instant`].
///
/// While running, the elapsed time keeps increasing; after [`Timer::stop`] it is
/// frozen. Asking for the elapsed time of a timer that was never started is an
/// error rather than a silent zero.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    start: Option<Instant>,
    stop: Option<Instant>,
}

impl Timer {
    /// Create a timer that has not been started yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timer that starts immediately.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    /// (Re)start the timer, discarding any previous measurement.
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
        self.stop = None;
    }

    /// Stop the timer. Stopping a timer that never started has no effect.
    pub fn stop(&mut self) {
        if self.start.is_some() && self.stop.is_none() {
            self.stop = Some(Instant::now());
        }
    }

    /// Whether the timer is started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.stop.is_none()
    }

    /// Elapsed time, up to now when running or up to the stop instant otherwise.
    pub fn elapsed(&self) -> Result<Duration, TimerError> {
        let start = self.start.ok_or(TimerError::NotStarted)?;
        let end = self.stop.unwrap_or_else(Instant::now);
        Ok(end.duration_since(start))
    }

    /// Elapsed time in seconds.
    pub fn elapsed_sec(&self) -> Result<f64, TimerError> {
        Ok(self.elapsed()?.as_secs_f64())
    }

    /// Elapsed time in nanoseconds.
    pub fn elapsed_nsec(&self) -> Result<u128, TimerError> {
        Ok(self.elapsed()?.as_nanos())
    }
}

/// Unit used when rendering a nanosecond duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
}

impl TimeUnit {
    /// Largest unit in which `nsec` is at least 1.
    pub fn for_nsec(nsec: f64) -> Self {
        let magnitude = nsec.abs();
        if magnitude < 1e3 {
            TimeUnit::Nanos
        } else if magnitude < 1e6 {
            TimeUnit::Micros
        } else if magnitude < 1e9 {
            TimeUnit::Millis
        } else {
            TimeUnit::Seconds
        }
    }

    /// Number of nanoseconds in one of this unit.
    pub const fn nsec_per_unit(self) -> f64 {
        match self {
            TimeUnit::Nanos => 1.0,
            TimeUnit::Micros => 1e3,
            TimeUnit::Millis => 1e6,
            TimeUnit::Seconds => 1e9,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "µs",
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Format `nsec` in the given unit as a right-aligned `"{:7.2} unit"` string.
pub fn format_nsec_as(nsec: f64, unit: TimeUnit) -> String {
    format!("{:7.2} {}", nsec / unit.nsec_per_unit(), unit)
}

/// Format `nsec` in the largest unit that keeps the value at or above 1.
pub fn format_nsec(nsec: f64) -> String {
    format_nsec_as(nsec, TimeUnit::for_nsec(nsec))
}

/// Format a quartile summary as `"median ± half-IQR"`, both in the unit picked
/// for the median.
pub fn format_time_durations(q25: f64, q50: f64, q75: f64) -> String {
    let unit = TimeUnit::for_nsec(q50);
    let half_iqr = (q75 - q25) / 2.0;
    format!("{} ± {}", format_nsec_as(q50, unit), format_nsec_as(half_iqr, unit))
}

/// Record one timed benchmark run with standard fields.
///
/// # Example
///
/// ```rust
/// use counted_float_tracing::performance::record_benchmark_run;
///
/// record_benchmark_run("c=a+b", 1_000_000, 850_000);
/// ```
pub fn record_benchmark_run(name: &str, n_operations: u64, t_nsecs: u64) {
    let nsec_per_operation = if n_operations > 0 {
        t_nsecs as f64 / n_operations as f64
    } else {
        0.0
    };

    tracing::debug!(
        event = "benchmark_run",
        benchmark = name,
        n_operations = n_operations,
        t_nsecs = t_nsecs,
        nsec_per_operation = nsec_per_operation,
        "benchmark_run_complete"
    );
}
