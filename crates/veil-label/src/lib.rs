#![forbid(unsafe_code)]

//! Frame-driven text reveal/hide label.
//!
//! The [`Label`] driver owns a styled text buffer and fades its units
//! (characters, words, or lines) in and out over configurable windows,
//! with per-unit timing planned by `veil-core`. The host delivers
//! monotonic timestamps via [`Label::tick`] whenever
//! [`Label::is_animating`] says the label wants frames, and renders from
//! the [`StyledBuffer`] snapshot between ticks.

pub mod buffer;
pub mod label;

pub use buffer::StyledBuffer;
pub use label::{CompletionFn, DEFAULT_WINDOW, Label, Outcome, Phase};
