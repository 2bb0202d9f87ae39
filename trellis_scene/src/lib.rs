// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Scene: observable scene objects wired through notification hubs.
//!
//! Every object here owns a [`NotificationHub`](trellis_notify::NotificationHub)
//! and signals one of the [change kinds](#change-kinds) when it changes.
//! Composites observe their parts:
//!
//! - A [`Polygon`] observes its [`Point`] vertices and keeps cached bounds.
//! - An [`Entity`] observes any [`Observable`](trellis_notify::Observable)
//!   components (polygons, brushes, tweens, text boxes) and re-broadcasts
//!   what it hears.
//! - A [`Stage`] observes entities and turns their signals into a sorted
//!   redraw list.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use kurbo::Vec2;
//! use peniko::Color;
//! use trellis_scene::{Brush, Entity, EntityId, Point, Polygon, Stage, GEOMETRY, STYLE};
//!
//! let stage = Stage::new();
//! let shape = Polygon::new([
//!     Rc::new(Point::new((0.0, 0.0))),
//!     Rc::new(Point::new((4.0, 0.0))),
//!     Rc::new(Point::new((4.0, 4.0))),
//! ]);
//! let brush = Rc::new(Brush::default());
//!
//! let entity = Entity::new(EntityId(1));
//! entity.add_component(shape.clone());
//! entity.add_component(brush.clone());
//! stage.add(entity);
//! stage.drain_dirty();
//!
//! shape.translate(Vec2::new(1.0, 0.0)).unwrap();
//! brush.set_fill(Color::from_rgba8(255, 0, 0, 255)).unwrap();
//!
//! let dirty = stage.drain_dirty();
//! assert_eq!(dirty.len(), 1);
//! assert!(dirty[0].1.contains(GEOMETRY));
//! assert!(dirty[0].1.contains(STYLE));
//! ```
//!
//! ## Change kinds
//!
//! [`GEOMETRY`], [`STYLE`], [`TRANSFORM`], and [`VALUE`] occupy change-kind
//! slots 0 to 3. Component kinds [`POINT`] through [`TWEEN`] tag the source.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable either `std` (default)
//! or `libm` for Kurbo and Peniko.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo and Peniko.
//! - `libm`: forward `libm` to Kurbo and Peniko for `no_std` builds.
//! - `tracing`: emit a `debug!` event for every stage drain.

#![no_std]

extern crate alloc;

mod brush;
mod entity;
mod kind;
mod point;
mod polygon;
mod stage;
mod trace;
mod tween;

pub use brush::Brush;
pub use entity::{Entity, EntityId};
pub use kind::{BRUSH, ENTITY, GEOMETRY, POINT, POLYGON, STYLE, TRANSFORM, TWEEN, VALUE};
pub use point::Point;
pub use polygon::Polygon;
pub use stage::Stage;
pub use tween::Tween;
