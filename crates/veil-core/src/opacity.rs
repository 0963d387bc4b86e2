#![forbid(unsafe_code)]

//! Elapsed-time to opacity mapping.
//!
//! Given a unit's [`UnitTiming`] and the animation direction, maps the time
//! elapsed since window start to an opacity in `[0.0, 1.0]`:
//!
//! - Reveal: holds 0 until the delay elapses, then rises linearly to 1 over
//!   the unit's duration.
//! - Hide: holds 1 until the delay elapses, then falls linearly to 0.
//!
//! A zero duration is an instantaneous step at the delay (never a division
//! by zero).

use std::time::Duration;

use crate::timing::UnitTiming;

/// Which way opacity is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Alpha 0 -> 1.
    Reveal,
    /// Alpha 1 -> 0.
    Hide,
}

/// Opacity of a unit at `elapsed` since window start, clamped to `[0, 1]`.
#[must_use]
pub fn opacity_at(elapsed: Duration, timing: UnitTiming, direction: Direction) -> f32 {
    let before_delay = elapsed < timing.delay;
    match direction {
        Direction::Reveal => {
            if before_delay {
                return 0.0;
            }
            if timing.duration.is_zero() {
                return 1.0;
            }
            let raw = (elapsed - timing.delay).as_secs_f64() / timing.duration.as_secs_f64();
            (raw as f32).clamp(0.0, 1.0)
        }
        Direction::Hide => {
            if before_delay {
                return 1.0;
            }
            if timing.duration.is_zero() {
                return 0.0;
            }
            let raw = 1.0 - (elapsed - timing.delay).as_secs_f64() / timing.duration.as_secs_f64();
            (raw as f32).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    fn timing(delay_ms: u64, duration_ms: u64) -> UnitTiming {
        UnitTiming::new(MS(delay_ms), MS(duration_ms))
    }

    #[test]
    fn reveal_holds_zero_before_delay() {
        let t = timing(500, 1000);
        assert_eq!(opacity_at(MS(0), t, Direction::Reveal), 0.0);
        assert_eq!(opacity_at(MS(499), t, Direction::Reveal), 0.0);
    }

    #[test]
    fn reveal_boundaries() {
        let t = timing(500, 1000);
        assert!((opacity_at(MS(500), t, Direction::Reveal) - 0.0).abs() < f32::EPSILON);
        assert!((opacity_at(MS(1500), t, Direction::Reveal) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reveal_midpoint() {
        let t = timing(500, 1000);
        assert!((opacity_at(MS(1000), t, Direction::Reveal) - 0.5).abs() < 0.001);
    }

    #[test]
    fn reveal_clamps_past_end() {
        let t = timing(0, 100);
        assert_eq!(opacity_at(MS(10_000), t, Direction::Reveal), 1.0);
    }

    #[test]
    fn reveal_monotonic_nondecreasing() {
        let t = timing(300, 700);
        let mut prev = -1.0f32;
        for ms in (0..1500).step_by(25) {
            let v = opacity_at(MS(ms), t, Direction::Reveal);
            assert!(v >= prev, "opacity decreased at {ms}ms");
            prev = v;
        }
    }

    #[test]
    fn hide_holds_one_before_delay() {
        let t = timing(500, 1000);
        assert_eq!(opacity_at(MS(0), t, Direction::Hide), 1.0);
        assert_eq!(opacity_at(MS(499), t, Direction::Hide), 1.0);
    }

    #[test]
    fn hide_boundaries() {
        let t = timing(500, 1000);
        assert!((opacity_at(MS(500), t, Direction::Hide) - 1.0).abs() < f32::EPSILON);
        assert!((opacity_at(MS(1500), t, Direction::Hide) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hide_monotonic_nonincreasing() {
        let t = timing(200, 800);
        let mut prev = 2.0f32;
        for ms in (0..1500).step_by(25) {
            let v = opacity_at(MS(ms), t, Direction::Hide);
            assert!(v <= prev, "opacity increased at {ms}ms");
            prev = v;
        }
    }

    #[test]
    fn zero_duration_steps_at_delay() {
        let t = timing(400, 0);
        assert_eq!(opacity_at(MS(399), t, Direction::Reveal), 0.0);
        assert_eq!(opacity_at(MS(400), t, Direction::Reveal), 1.0);
        assert_eq!(opacity_at(MS(399), t, Direction::Hide), 1.0);
        assert_eq!(opacity_at(MS(400), t, Direction::Hide), 0.0);
    }

    #[test]
    fn zero_delay_zero_duration_is_immediate() {
        let t = timing(0, 0);
        assert_eq!(opacity_at(Duration::ZERO, t, Direction::Reveal), 1.0);
        assert_eq!(opacity_at(Duration::ZERO, t, Direction::Hide), 0.0);
    }

    #[test]
    fn output_always_in_unit_interval() {
        let t = timing(130, 270);
        for ms in (0..2000).step_by(7) {
            for direction in [Direction::Reveal, Direction::Hide] {
                let v = opacity_at(MS(ms), t, direction);
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
