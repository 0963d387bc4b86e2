#![forbid(unsafe_code)]

//! Animation units: what gets its own timing slot.
//!
//! A unit is a contiguous run of characters that fades together. The
//! [`Granularity`] policy decides what a unit is:
//!
//! - `PerCharacter`: one unit per non-whitespace character (whitespace is
//!   never animated and stays fully opaque)
//! - `PerWord` / `PerLine`: ranges from a [`Tokenizer`]
//! - `Disabled`: no units at all, the driver is bypassed
//!
//! Ranges are **char indices**, not byte offsets, so they line up with the
//! styled buffer's one-color-per-char layout.
//!
//! # Invariants
//!
//! 1. Units are ordered and non-overlapping.
//! 2. Per-character units never cover whitespace.
//! 3. `units_for(text, Disabled, ..)` is empty for any text.

use unicode_segmentation::UnicodeSegmentation;

/// Policy choosing what constitutes an animation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// No animation; text is always fully opaque.
    #[default]
    Disabled,
    /// Each non-whitespace character fades independently (randomized timing).
    PerCharacter,
    /// Each word fades as one unit (deterministic left-to-right sweep).
    PerWord,
    /// Each line fades as one unit (deterministic top-to-bottom sweep).
    PerLine,
}

impl Granularity {
    /// Whether this policy produces units to animate.
    #[inline]
    #[must_use]
    pub const fn is_animated(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// A contiguous char-index range animated as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRange {
    /// First char index covered by this unit.
    pub start: usize,
    /// Number of chars covered.
    pub len: usize,
}

impl UnitRange {
    /// Create a range from a start char index and char count.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One-past-the-end char index.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }
}

/// Splits text into ordered `(start, len)` char ranges for word and line
/// granularity.
pub trait Tokenizer {
    /// Word ranges in order. Whitespace runs between words are excluded.
    fn words(&self, text: &str) -> Vec<UnitRange>;

    /// Line ranges in order. Line terminators and empty lines are excluded.
    fn lines(&self, text: &str) -> Vec<UnitRange>;
}

/// Default tokenizer built on Unicode word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn words(&self, text: &str) -> Vec<UnitRange> {
        let mut units = Vec::new();
        let mut pos = 0usize;
        for (_, segment) in text.split_word_bound_indices() {
            let len = segment.chars().count();
            if !segment.chars().all(char::is_whitespace) {
                units.push(UnitRange::new(pos, len));
            }
            pos += len;
        }
        units
    }

    fn lines(&self, text: &str) -> Vec<UnitRange> {
        let mut units = Vec::new();
        let mut pos = 0usize;
        for line in text.split('\n') {
            let full_len = line.chars().count();
            // CRLF terminators leave a trailing '\r'; it is whitespace and
            // must stay outside the unit.
            let line = line.strip_suffix('\r').unwrap_or(line);
            let len = line.chars().count();
            if !line.is_empty() && !line.chars().all(char::is_whitespace) {
                units.push(UnitRange::new(pos, len));
            }
            pos += full_len + 1; // account for the consumed '\n'
        }
        units
    }
}

/// Derive the unit list for `text` under `granularity`.
#[must_use]
pub fn units_for(text: &str, granularity: Granularity, tokenizer: &dyn Tokenizer) -> Vec<UnitRange> {
    match granularity {
        Granularity::Disabled => Vec::new(),
        Granularity::PerCharacter => text
            .chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(i, _)| UnitRange::new(i, 1))
            .collect(),
        Granularity::PerWord => tokenizer.words(text),
        Granularity::PerLine => tokenizer.lines(text),
    }
}
