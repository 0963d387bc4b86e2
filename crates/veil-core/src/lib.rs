#![forbid(unsafe_code)]

//! Core timing engine for the veil text reveal/hide effect.
//!
//! This crate holds the pure, clock-free pieces of the effect:
//!
//! - [`color`]: the packed RGBA attribute each character carries
//! - [`rng`]: the injectable random source used by the planner
//! - [`unit`]: granularity policy and unit derivation over text
//! - [`timing`]: per-unit `(delay, duration)` planning inside a window
//! - [`opacity`]: elapsed-time to opacity mapping for both directions
//!
//! The stateful driver that owns a styled buffer and consumes frame ticks
//! lives in `veil-label`.

pub mod color;
pub mod opacity;
pub mod rng;
pub mod timing;
pub mod unit;

pub use color::Rgba;
pub use opacity::{Direction, opacity_at};
pub use rng::{RandomSource, XorShift64};
pub use timing::{TimingPlan, UnitTiming};
pub use unit::{Granularity, Tokenizer, UnicodeTokenizer, UnitRange, units_for};
