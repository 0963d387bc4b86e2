#![forbid(unsafe_code)]

//! Per-unit timing plans.
//!
//! A plan assigns every unit a `(delay, duration)` pair inside a total
//! window. Two strategies exist:
//!
//! - [`TimingPlan::randomized`]: delay drawn from the first half of the
//!   window, duration drawn from the budget left after the delay. Draws are
//!   quantized to hundredths of a second, so a draw of zero is possible and
//!   means an instantaneous step at the delay.
//! - [`TimingPlan::sweep`]: deterministic equal slices, `delay_i = i * slice`
//!   and `duration_i = slice`, used for word and line granularity so the
//!   reveal reads as a steady sweep.
//!
//! # Invariants
//!
//! 1. `delay <= window / 2` for randomized plans.
//! 2. `delay + duration <= window` for every unit, both strategies.
//! 3. A zero or sub-quantum window never panics; it clamps to a minimum
//!    positive window and degenerates to all-zero (instantaneous) timings.
//! 4. Plans for zero units are empty.

use std::time::Duration;

use crate::rng::RandomSource;

/// Smallest window the planner will work with. Zero windows are clamped
/// up to this so progress ratios never divide by zero.
pub const MIN_WINDOW: Duration = Duration::from_nanos(1);

/// Centiseconds per draw quantum (the original effect drew integer
/// hundredths of a second).
const QUANTUM_MS: u64 = 10;

/// One unit's animation interval inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitTiming {
    /// Time from window start before this unit begins changing opacity.
    pub delay: Duration,
    /// Time the unit takes to cross the full opacity range. Zero means the
    /// unit snaps to its target the moment the delay elapses.
    pub duration: Duration,
}

impl UnitTiming {
    /// Create a timing pair.
    #[inline]
    #[must_use]
    pub const fn new(delay: Duration, duration: Duration) -> Self {
        Self { delay, duration }
    }

    /// When this unit is fully transitioned, relative to window start.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }
}

/// A full timing table, one entry per unit, plus the window it was planned
/// for.
#[derive(Debug, Clone, Default)]
pub struct TimingPlan {
    timings: Vec<UnitTiming>,
    window: Duration,
}

impl TimingPlan {
    /// An empty plan (no units).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Randomized plan: `delay_i ~ U[0, window/2)`, then
    /// `duration_i ~ U[0, window - delay_i)`, both in centisecond quanta.
    #[must_use]
    pub fn randomized(window: Duration, count: usize, rng: &mut dyn RandomSource) -> Self {
        let window = window.max(MIN_WINDOW);
        let window_cs = (window.as_millis() as u64 / QUANTUM_MS) as u32;
        let timings = (0..count)
            .map(|_| {
                let delay_cs = rng.uniform_u32(window_cs / 2);
                let remaining_cs = window_cs - delay_cs;
                let duration_cs = rng.uniform_u32(remaining_cs);
                UnitTiming::new(
                    Duration::from_millis(u64::from(delay_cs) * QUANTUM_MS),
                    Duration::from_millis(u64::from(duration_cs) * QUANTUM_MS),
                )
            })
            .collect();
        Self { timings, window }
    }

    /// Deterministic equal-slice plan for sweep granularities.
    #[must_use]
    pub fn sweep(window: Duration, count: usize) -> Self {
        let window = window.max(MIN_WINDOW);
        if count == 0 {
            return Self {
                timings: Vec::new(),
                window,
            };
        }
        let slice = window / count as u32;
        let timings = (0..count)
            .map(|i| UnitTiming::new(slice.saturating_mul(i as u32), slice))
            .collect();
        Self { timings, window }
    }

    /// Number of unit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timings.len()
    }

    /// Whether the plan has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    /// The (clamped) window this plan was computed for.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Timing for unit `i`, if planned.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&UnitTiming> {
        self.timings.get(i)
    }

    /// Iterate over unit timings in unit order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitTiming> {
        self.timings.iter()
    }
}
