// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by a broadcast.

use alloc::boxed::Box;
use core::error::Error;
use core::fmt;

use crate::kind::ComponentKind;

/// Error returned when a dirty broadcast could not reach every dependent.
///
/// A broadcast stops at the first error; dependents after the failing one
/// are not notified in that pass.
pub enum NotifyError {
    /// A dependent was dropped without being detached from the hub.
    ///
    /// This is a contract violation on the owner's side: the dropped object
    /// would have missed this invalidation.
    DroppedObserver {
        /// Component kind of the hub that was broadcasting.
        component: ComponentKind,
    },
    /// A dependent's callback failed.
    Observer(Box<dyn Error + 'static>),
}

impl NotifyError {
    /// Wraps an error raised by an observer callback.
    pub fn observer(error: impl Error + 'static) -> Self {
        Self::Observer(Box::new(error))
    }
}

impl fmt::Debug for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedObserver { component } => f
                .debug_struct("DroppedObserver")
                .field("component", component)
                .finish(),
            Self::Observer(source) => f.debug_tuple("Observer").field(source).finish(),
        }
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedObserver { component } => write!(
                f,
                "a dependent of {component:?} was dropped without being detached"
            ),
            Self::Observer(source) => write!(f, "dependent failed to handle dirty signal: {source}"),
        }
    }
}

impl Error for NotifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DroppedObserver { .. } => None,
            Self::Observer(source) => Some(source.as_ref()),
        }
    }
}
