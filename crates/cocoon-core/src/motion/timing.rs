//! Time calculation utilities for animations.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now` for an animation that began at `start`
///
/// A zero duration is complete immediately. A `now` earlier than `start`
/// reports no progress.
#[inline]
pub fn progress_at(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_u16() {
        assert_eq!(lerp_u16(0, 100, 0.0), 0);
        assert_eq!(lerp_u16(0, 100, 0.5), 50);
        assert_eq!(lerp_u16(100, 0, 1.0), 0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert_eq!(progress_at(start, start, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_progress_at_clamps() {
        let start = Instant::now();
        let duration = Duration::from_millis(2000);
        assert_eq!(progress_at(start, start, duration), 0.0);
        assert_eq!(progress_at(start, start + Duration::from_millis(1000), duration), 0.5);
        assert_eq!(progress_at(start, start + Duration::from_millis(5000), duration), 1.0);
    }
}
