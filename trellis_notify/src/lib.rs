// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Notify: the change-propagation graph shared by every stateful
//! object in the toolkit.
//!
//! Geometry, brushes, text boxes, and scene entities all keep cached derived
//! state (bounding boxes, wrapped lines, redraw lists). When something they
//! depend on mutates, they must hear about it exactly once and without the
//! mutation site knowing who they are. This crate provides:
//!
//! - **Hubs** ([`NotificationHub`]): embedded in an observable object, they
//!   hold the object's dependents and broadcast its dirty signals.
//! - **Observers** ([`DependencyObserver`]): the one-method callback every
//!   dependent implements.
//! - **Kinds** ([`ComponentKind`], [`ChangeKind`], [`ChangeSet`]): what kind of
//!   object broadcast, and what changed, so observers can react selectively.
//! - **Freeze scopes** ([`NotificationHub::frozen`], [`FreezeGuard`]): nested
//!   suppression for batched mutation.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use trellis_notify::{
//!     ChangeKind, ComponentKind, DependencyObserver, NotificationHub, NotifyError,
//! };
//!
//! const POINT: ComponentKind = ComponentKind::new(1);
//! const GEOMETRY: ChangeKind = ChangeKind::new(0);
//!
//! /// Caches something derived from the point; forgets it on change.
//! #[derive(Default)]
//! struct BoundsCache {
//!     stale: Cell<bool>,
//! }
//!
//! impl DependencyObserver for BoundsCache {
//!     fn dependency_dirtied(
//!         &self,
//!         component: ComponentKind,
//!         _source: &NotificationHub,
//!         change: ChangeKind,
//!     ) -> Result<(), NotifyError> {
//!         if component == POINT && change == GEOMETRY {
//!             self.stale.set(true);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let point = NotificationHub::new(POINT);
//! let cache = Rc::new(BoundsCache::default());
//! point.attach(&cache);
//!
//! // Three mutations, one invalidation.
//! point.freeze();
//! point.dirty(GEOMETRY).unwrap();
//! point.dirty(GEOMETRY).unwrap();
//! point.dirty(GEOMETRY).unwrap();
//! point.unfreeze();
//! assert!(!cache.stale.get());
//!
//! point.dirty(GEOMETRY).unwrap();
//! assert!(cache.stale.get());
//! ```
//!
//! ## Storage
//!
//! Most objects have zero or one dependent. A hub stores a single dependent
//! directly and only allocates a list for the second one; see
//! [`DependentStorage`]. Broadcast order is always attachment order.
//!
//! ## Ownership
//!
//! Hubs hold dependents weakly. An observer that is dropped while still
//! attached makes the next broadcast fail with
//! [`NotifyError::DroppedObserver`] rather than silently missing the signal;
//! owners detach in their `Drop` with [`NotificationHub::detach_weak`].
//!
//! ## Re-entrancy
//!
//! Broadcasts are synchronous and depth-first: a `dirty` call returns only
//! after every transitive observer has run. Callbacks may attach, detach, or
//! dirty the hub that is calling them. Dependents added or removed during a
//! pass may or may not be visited in that same pass.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `tracing`: emit `trace!` events for attach, detach, suppressed signals,
//!   and broadcasts.

#![no_std]

extern crate alloc;

mod error;
mod hub;
mod kind;
mod observer;
mod trace;

pub use error::NotifyError;
pub use hub::{DependentStorage, FreezeGuard, NotificationHub};
pub use kind::{ChangeKind, ChangeSet, ChangeSetIter, ComponentKind};
pub use observer::{DependencyObserver, Observable};
