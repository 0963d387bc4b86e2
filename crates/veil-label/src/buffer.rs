#![forbid(unsafe_code)]

//! Styled text buffer: the mutable surface the driver writes each tick.
//!
//! One [`Rgba`] per char, parallel to the text. The driver rewrites unit
//! ranges during an animation; the host reads the whole buffer as a
//! snapshot after a tick returns. The buffer is rebuilt wholesale whenever
//! text, color, or granularity changes (no partial reuse).

use veil_core::{Rgba, UnitRange};

/// Owned text plus a per-char color attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledBuffer {
    text: String,
    colors: Vec<Rgba>,
}

impl StyledBuffer {
    /// Build a buffer with every char at the given color (full opacity
    /// belongs to the caller's color choice).
    #[must_use]
    pub fn new(text: &str, color: Rgba) -> Self {
        let colors = vec![color; text.chars().count()];
        Self {
            text: text.to_owned(),
            colors,
        }
    }

    /// The text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of chars (and color slots).
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the buffer holds no chars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of the char at `index`, if in range.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<Rgba> {
        self.colors.get(index).copied()
    }

    /// Overwrite the color across a unit range. Ranges must come from the
    /// unit list derived for the current text; out-of-range tails are
    /// clipped.
    pub fn set_range(&mut self, range: UnitRange, color: Rgba) {
        debug_assert!(range.end() <= self.colors.len(), "range {range:?} out of bounds");
        let end = range.end().min(self.colors.len());
        for slot in &mut self.colors[range.start.min(end)..end] {
            *slot = color;
        }
    }

    /// Per-char colors in order, zipped with the chars they style.
    pub fn iter(&self) -> impl Iterator<Item = (char, Rgba)> + '_ {
        self.text.chars().zip(self.colors.iter().copied())
    }

    /// Per-char alpha channel values, in char order.
    #[must_use]
    pub fn alphas(&self) -> Vec<u8> {
        self.colors.iter().map(|c| c.a()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_uniform_color() {
        let buf = StyledBuffer::new("abc", Rgba::rgb(1, 2, 3));
        assert_eq!(buf.len(), 3);
        assert!(buf.alphas().iter().all(|&a| a == 255));
    }

    #[test]
    fn len_counts_chars_not_bytes() {
        let buf = StyledBuffer::new("héllo", Rgba::WHITE);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn set_range_overwrites_only_that_range() {
        let mut buf = StyledBuffer::new("abcde", Rgba::WHITE);
        buf.set_range(UnitRange::new(1, 2), Rgba::WHITE.with_alpha(0));
        assert_eq!(buf.alphas(), vec![255, 0, 0, 255, 255]);
    }

    #[test]
    fn empty_text_buffer() {
        let buf = StyledBuffer::new("", Rgba::WHITE);
        assert!(buf.is_empty());
        assert!(buf.alphas().is_empty());
    }

    #[test]
    fn color_at_out_of_range_is_none() {
        let buf = StyledBuffer::new("ab", Rgba::WHITE);
        assert!(buf.color_at(5).is_none());
    }

    #[test]
    fn iter_pairs_chars_with_colors() {
        let mut buf = StyledBuffer::new("ab", Rgba::rgb(9, 9, 9));
        buf.set_range(UnitRange::new(0, 1), Rgba::rgb(9, 9, 9).with_alpha(0));
        let pairs: Vec<(char, u8)> = buf.iter().map(|(ch, c)| (ch, c.a())).collect();
        assert_eq!(pairs, vec![('a', 0), ('b', 255)]);
    }
}
