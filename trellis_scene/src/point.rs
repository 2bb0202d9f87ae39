// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable vertex positions.

use core::cell::Cell;
use core::fmt;

use kurbo::Vec2;
use trellis_notify::{NotificationHub, NotifyError, Observable};

use crate::kind::{GEOMETRY, POINT};

/// An observable position.
///
/// Every move signals [`GEOMETRY`]; moving to the current position signals
/// nothing.
pub struct Point {
    hub: NotificationHub,
    position: Cell<kurbo::Point>,
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("hub", &self.hub)
            .field("position", &self.position.get())
            .finish()
    }
}

impl Point {
    /// Creates a point at `position`.
    #[must_use]
    pub fn new(position: impl Into<kurbo::Point>) -> Self {
        Self {
            hub: NotificationHub::new(POINT),
            position: Cell::new(position.into()),
        }
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> kurbo::Point {
        self.position.get()
    }

    /// Moves to `position`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn set(&self, position: impl Into<kurbo::Point>) -> Result<(), NotifyError> {
        let position = position.into();
        if self.position.replace(position) != position {
            self.hub.dirty(GEOMETRY)?;
        }
        Ok(())
    }

    /// Moves by `delta`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn translate(&self, delta: Vec2) -> Result<(), NotifyError> {
        self.set(self.position() + delta)
    }
}

impl Observable for Point {
    fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}
