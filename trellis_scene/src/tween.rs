// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-clocked linear animation of a scalar.

use core::cell::Cell;
use core::fmt;

use trellis_notify::{NotificationHub, NotifyError, Observable};

use crate::kind::{TWEEN, VALUE};

/// A scalar that moves linearly from one value to another over a duration.
///
/// There is no internal clock. The host calls [`advance`](Self::advance)
/// with the current time in seconds, typically once per frame, and the
/// tween signals [`VALUE`] whenever its value moves.
///
/// ```
/// use trellis_scene::Tween;
///
/// let fade = Tween::new(0.0, 1.0, 2.0);
/// fade.start(10.0).unwrap();
/// assert!(fade.advance(11.0).unwrap());
/// assert_eq!(fade.value(), 0.5);
/// assert!(!fade.advance(12.5).unwrap());
/// assert_eq!(fade.value(), 1.0);
/// ```
pub struct Tween {
    hub: NotificationHub,
    from: f64,
    to: f64,
    duration: f64,
    value: Cell<f64>,
    started_at: Cell<Option<f64>>,
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("hub", &self.hub)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("value", &self.value.get())
            .field("started_at", &self.started_at.get())
            .finish()
    }
}

impl Tween {
    /// Creates a stopped tween resting at `from`.
    ///
    /// A `duration` of zero or less jumps straight to `to` on the first
    /// [`advance`](Self::advance).
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            hub: NotificationHub::new(TWEEN),
            from,
            to,
            duration,
            value: Cell::new(from),
            started_at: Cell::new(None),
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Returns `true` between [`start`](Self::start) and the end of the run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.get().is_some()
    }

    /// Starts (or restarts) the run at time `now`, resetting to `from`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn start(&self, now: f64) -> Result<(), NotifyError> {
        self.started_at.set(Some(now));
        self.set_value(self.from)
    }

    /// Stops the run, leaving the value where it is.
    pub fn stop(&self) {
        self.started_at.set(None);
    }

    /// Moves the value to where it should be at time `now`.
    ///
    /// Returns `true` while the tween is still running. Reaching the end
    /// stops it; advancing a stopped tween does nothing.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn advance(&self, now: f64) -> Result<bool, NotifyError> {
        let Some(started_at) = self.started_at.get() else {
            return Ok(false);
        };
        let t = if self.duration > 0.0 {
            ((now - started_at) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            self.stop();
        }
        self.set_value(self.from + (self.to - self.from) * t)?;
        Ok(self.is_running())
    }

    fn set_value(&self, value: f64) -> Result<(), NotifyError> {
        if self.value.replace(value) != value {
            self.hub.dirty(VALUE)?;
        }
        Ok(())
    }
}

impl Observable for Tween {
    fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_tween_ignores_time() {
        let tween = Tween::new(1.0, 2.0, 1.0);
        assert!(!tween.advance(100.0).unwrap());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn time_before_start_clamps() {
        let tween = Tween::new(0.0, 10.0, 4.0);
        tween.start(5.0).unwrap();
        assert!(tween.advance(3.0).unwrap());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let tween = Tween::new(0.0, 3.0, 0.0);
        tween.start(0.0).unwrap();
        assert!(!tween.advance(0.0).unwrap());
        assert_eq!(tween.value(), 3.0);
    }

    #[test]
    fn stop_keeps_value_and_restart_resets() {
        let tween = Tween::new(0.0, 8.0, 4.0);
        tween.start(0.0).unwrap();
        tween.advance(1.0).unwrap();
        tween.stop();
        assert_eq!(tween.value(), 2.0);
        assert!(!tween.advance(2.0).unwrap());
        assert_eq!(tween.value(), 2.0);

        tween.start(10.0).unwrap();
        assert_eq!(tween.value(), 0.0);
        assert!(tween.is_running());
    }
}
