// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component and change kinds broadcast by scene objects.
//!
//! Change kinds share one 64-slot space with every other crate that
//! broadcasts into the same graph. Scene kinds use the low slots; text
//! layout uses slots 8 and up.

use trellis_notify::{ChangeKind, ComponentKind};

/// Position or shape changed.
pub const GEOMETRY: ChangeKind = ChangeKind::new(0);
/// Fill, stroke, or another paint property changed.
pub const STYLE: ChangeKind = ChangeKind::new(1);
/// Placement or visibility changed.
pub const TRANSFORM: ChangeKind = ChangeKind::new(2);
/// An animated value moved.
pub const VALUE: ChangeKind = ChangeKind::new(3);

/// Broadcast by [`Point`](crate::Point).
pub const POINT: ComponentKind = ComponentKind::new(1);
/// Broadcast by [`Polygon`](crate::Polygon).
pub const POLYGON: ComponentKind = ComponentKind::new(2);
/// Broadcast by [`Brush`](crate::Brush).
pub const BRUSH: ComponentKind = ComponentKind::new(3);
/// Broadcast by [`Entity`](crate::Entity).
pub const ENTITY: ComponentKind = ComponentKind::new(4);
/// Broadcast by [`Tween`](crate::Tween).
pub const TWEEN: ComponentKind = ComponentKind::new(5);
