#![forbid(unsafe_code)]

//! Veil public facade crate.
//!
//! Re-exports the timing engine (`veil-core`) and the label driver
//! (`veil-label`) behind one surface, plus a prelude for day-to-day usage.
//!
//! ```ignore
//! use veil::prelude::*;
//! use std::time::Duration;
//!
//! let mut label = Label::new();
//! label.set_granularity(Granularity::PerCharacter);
//! label.set_reveal_duration(Duration::from_secs(2));
//! label.set_text("now you see me");
//! label.show_up_with(|_| println!("settled"));
//! // each frame: label.tick(now); render(label.styled());
//! ```

// --- Core re-exports --------------------------------------------------------

pub use veil_core::color::Rgba;
pub use veil_core::opacity::{Direction, opacity_at};
pub use veil_core::rng::{RandomSource, XorShift64};
pub use veil_core::timing::{TimingPlan, UnitTiming};
pub use veil_core::unit::{Granularity, Tokenizer, UnicodeTokenizer, UnitRange, units_for};

// --- Label re-exports -------------------------------------------------------

pub use veil_label::{CompletionFn, DEFAULT_WINDOW, Label, Outcome, Phase, StyledBuffer};

/// Common imports for typical usage.
pub mod prelude {
    pub use crate::{Direction, Granularity, Label, Outcome, Phase, Rgba, StyledBuffer};
}
