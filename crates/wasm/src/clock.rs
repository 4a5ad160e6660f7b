use std::time::Duration;

/// Converts a browser timestamp in milliseconds to an elapsed duration.
///
/// Negative and non-finite readings clamp to zero.
pub fn elapsed_from_ms(time_ms: f64) -> Duration {
    if time_ms.is_finite() && time_ms > 0.0 {
        Duration::from_secs_f64(time_ms / 1000.0)
    } else {
        Duration::ZERO
    }
}
