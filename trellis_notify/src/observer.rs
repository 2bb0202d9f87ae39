// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer and observable traits.

use core::any::Any;

use crate::error::NotifyError;
use crate::hub::NotificationHub;
use crate::kind::{ChangeKind, ComponentKind};

/// An object that can be attached to a [`NotificationHub`] as a dependent.
///
/// The hub calls [`dependency_dirtied`](Self::dependency_dirtied) once per
/// attachment every time it broadcasts. Implementations typically drop some
/// cached state and, when they are observable themselves, call
/// [`NotificationHub::dirty`] on their own hub so the signal keeps flowing
/// upward.
///
/// Callbacks run synchronously inside the broadcasting `dirty` call. They may
/// attach to, detach from, or dirty the hub that is calling them.
///
/// The `Any` supertrait lets [`NotificationHub::for_each_dependent`] callers
/// downcast a dependent to its concrete type.
pub trait DependencyObserver: Any {
    /// Handles a dirty signal from `source`.
    ///
    /// `component` is the kind tag of `source`, `change` says what changed.
    /// Returning an error aborts the rest of the broadcast and hands the error
    /// to whoever called `dirty`.
    fn dependency_dirtied(
        &self,
        component: ComponentKind,
        source: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError>;
}

/// An object that exposes a [`NotificationHub`] others can subscribe to.
///
/// Composite objects use this to attach themselves to heterogeneous
/// children without knowing their concrete types.
pub trait Observable {
    /// Returns the hub that broadcasts this object's changes.
    fn hub(&self) -> &NotificationHub;
}

impl Observable for NotificationHub {
    fn hub(&self) -> &NotificationHub {
        self
    }
}
