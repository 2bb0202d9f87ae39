// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font selection and the descriptor handed to glyph measurement.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::error::LayoutError;

/// Slant of a font face.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// A true italic face.
    Italic,
    /// A slanted version of the upright face.
    Oblique,
}

impl FontStyle {
    fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Italic => Some("italic"),
            Self::Oblique => Some("oblique"),
        }
    }
}

/// Font used to measure and draw a run of text.
///
/// ```
/// use trellis_text::{Font, FontStyle};
///
/// let font = Font::new("serif", 14.0).with_weight(700).with_style(FontStyle::Italic);
/// assert_eq!(font.descriptor().unwrap().as_str(), "italic 700 14px serif");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name or generic family (`"sans-serif"`).
    pub family: String,
    /// Size in pixels.
    pub size: f32,
    /// Numeric weight, 400 is regular and 700 is bold.
    pub weight: u16,
    /// Slant.
    pub style: FontStyle,
}

impl Font {
    /// Regular weight.
    pub const NORMAL_WEIGHT: u16 = 400;
    /// Bold weight.
    pub const BOLD_WEIGHT: u16 = 700;

    /// Creates a regular, upright font.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: Self::NORMAL_WEIGHT,
            style: FontStyle::Normal,
        }
    }

    /// Sets the numeric weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the slant.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Builds the descriptor passed to [`Measure`](crate::Measure).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::FontUnresolved`] if the family is blank or the
    /// size is not a positive finite number.
    pub fn descriptor(&self) -> Result<FontDescriptor, LayoutError> {
        let family = self.family.trim();
        if family.is_empty() || !self.size.is_finite() || self.size <= 0.0 {
            return Err(LayoutError::FontUnresolved);
        }
        let mut shorthand = String::new();
        if let Some(style) = self.style.keyword() {
            shorthand.push_str(style);
            shorthand.push(' ');
        }
        if self.weight != Self::NORMAL_WEIGHT {
            shorthand.push_str(&format!("{} ", self.weight));
        }
        shorthand.push_str(&format!("{}px {family}", self.size));
        Ok(FontDescriptor(shorthand))
    }
}

/// A resolved font in CSS shorthand form, e.g. `"bold 12px sans-serif"`.
///
/// This is what a canvas-style measurement function expects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontDescriptor(String);

impl FontDescriptor {
    /// Returns the shorthand string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
