//! Convenience macros for timing code sections

/// Execute a block of code with automatic timing.
///
/// Returns a tuple of (result, duration in nanoseconds) and emits a debug
/// event carrying the name and duration.
///
/// # Syntax
///
/// ```text
/// let (result, duration_ns) = timed_block!("operation_name", {
///     // code to time
/// });
/// ```
///
/// # Example
///
/// ```rust
/// use counted_float_tracing::timed_block;
///
/// let (sum, duration_ns) = timed_block!("sum_calculation", {
///     (1..=100).sum::<i32>()
/// });
///
/// assert_eq!(sum, 5050);
/// println!("took {}ns", duration_ns);
/// ```
#[macro_export]
macro_rules! timed_block {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration_ns = start.elapsed().as_nanos() as u64;
        $crate::debug!(
            operation = $name,
            duration_ns = duration_ns,
            duration_ms = duration_ns as f64 / 1_000_000.0,
            "timed_block_complete"
        );
        (result, duration_ns)
    }};
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_timed_block_macro() {
        let (result, duration_ns) = timed_block!("test_block", {
            thread::sleep(Duration::from_millis(10));
            42
        });
        assert_eq!(result, 42);
        assert!(duration_ns >= 10_000_000, "Should take at least 10ms");
    }

    #[test]
    fn test_timed_block_with_error() {
        let (result, _duration_ns) = timed_block!("test_error_block", { Result::<i32, &str>::Err("test error") });
        assert!(result.is_err());
    }
}
