// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable fill and stroke settings.

use core::cell::Cell;
use core::fmt;

use peniko::Color;
use trellis_notify::{NotificationHub, NotifyError, Observable};

use crate::kind::{BRUSH, STYLE};

/// Observable paint settings: a fill color and a stroke width.
///
/// Setters signal [`STYLE`] only when the value actually changes.
pub struct Brush {
    hub: NotificationHub,
    fill: Cell<Color>,
    stroke_width: Cell<f64>,
}

impl fmt::Debug for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brush")
            .field("hub", &self.hub)
            .field("fill", &self.fill.get())
            .field("stroke_width", &self.stroke_width.get())
            .finish()
    }
}

impl Default for Brush {
    /// Opaque black fill with a one pixel stroke.
    fn default() -> Self {
        Self::new(Color::from_rgba8(0, 0, 0, 255), 1.0)
    }
}

impl Brush {
    /// Creates a brush.
    #[must_use]
    pub fn new(fill: Color, stroke_width: f64) -> Self {
        Self {
            hub: NotificationHub::new(BRUSH),
            fill: Cell::new(fill),
            stroke_width: Cell::new(stroke_width),
        }
    }

    /// Returns the fill color.
    #[must_use]
    pub fn fill(&self) -> Color {
        self.fill.get()
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.get()
    }

    /// Replaces the fill color.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn set_fill(&self, fill: Color) -> Result<(), NotifyError> {
        let previous = self.fill.replace(fill);
        if previous.components != fill.components {
            self.hub.dirty(STYLE)?;
        }
        Ok(())
    }

    /// Replaces the stroke width.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn set_stroke_width(&self, stroke_width: f64) -> Result<(), NotifyError> {
        if self.stroke_width.replace(stroke_width) != stroke_width {
            self.hub.dirty(STYLE)?;
        }
        Ok(())
    }
}

impl Observable for Brush {
    fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}
