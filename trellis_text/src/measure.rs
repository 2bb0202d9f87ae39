// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph measurement supplied by the rendering side.

use crate::font::FontDescriptor;

/// Measures the advance width of a string in a font.
///
/// The layout engine treats this as a pure function: the same text and
/// descriptor must always give the same width. Any caching is up to the
/// implementation.
///
/// Closures implement this trait:
///
/// ```
/// use trellis_text::{Font, Measure};
///
/// let measure = |text: &str, _: &_| text.len() as f64 * 7.0;
/// let font = Font::new("monospace", 12.0).descriptor().unwrap();
/// assert_eq!(measure.measure("abc", &font), 21.0);
/// ```
pub trait Measure {
    /// Returns the width of `text` drawn with `font`, in pixels.
    fn measure(&self, text: &str, font: &FontDescriptor) -> f64;
}

impl<F> Measure for F
where
    F: Fn(&str, &FontDescriptor) -> f64,
{
    fn measure(&self, text: &str, font: &FontDescriptor) -> f64 {
        self(text, font)
    }
}

/// Gives every character the same advance, whatever the font.
///
/// Useful for tests and for monospace terminals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedAdvance(pub f64);

impl Measure for FixedAdvance {
    fn measure(&self, text: &str, _: &FontDescriptor) -> f64 {
        let chars = text.chars().count() as f64;
        chars * self.0
    }
}
