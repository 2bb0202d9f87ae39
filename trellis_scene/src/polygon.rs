// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed shapes over shared vertices.

use alloc::rc::{Rc, Weak};
use core::cell::Cell;
use core::fmt;

use kurbo::{BezPath, Rect, Vec2};
use smallvec::SmallVec;
use trellis_notify::{
    ChangeKind, ComponentKind, DependencyObserver, NotificationHub, NotifyError, Observable,
};

use crate::kind::{GEOMETRY, POINT, POLYGON};
use crate::point::Point;

/// Inline vertex capacity; triangles and quads never allocate.
const INLINE_VERTICES: usize = 4;

/// A closed shape over shared, observable vertices.
///
/// The polygon attaches itself to each vertex. A vertex move drops the cached
/// bounds and is re-broadcast as a [`POLYGON`] [`GEOMETRY`] change, so an
/// entity holding the polygon hears about it without watching every vertex.
///
/// ```
/// use std::rc::Rc;
///
/// use kurbo::{Rect, Vec2};
/// use trellis_scene::{Point, Polygon};
///
/// let corner = Rc::new(Point::new((2.0, 1.0)));
/// let triangle = Polygon::new([
///     Rc::new(Point::new((0.0, 0.0))),
///     corner.clone(),
///     Rc::new(Point::new((0.0, 3.0))),
/// ]);
/// assert_eq!(triangle.bounds(), Rect::new(0.0, 0.0, 2.0, 3.0));
///
/// corner.translate(Vec2::new(2.0, 0.0)).unwrap();
/// assert_eq!(triangle.bounds(), Rect::new(0.0, 0.0, 4.0, 3.0));
/// ```
///
/// Dropping the polygon detaches it from every vertex.
pub struct Polygon {
    hub: NotificationHub,
    vertices: SmallVec<[Rc<Point>; INLINE_VERTICES]>,
    bounds: Cell<Option<Rect>>,
    this: Weak<Self>,
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polygon")
            .field("hub", &self.hub)
            .field("vertices", &self.vertices)
            .field("bounds", &self.bounds.get())
            .finish_non_exhaustive()
    }
}

impl Polygon {
    /// Creates a polygon over `vertices` and starts observing them.
    ///
    /// A vertex listed twice is observed twice.
    pub fn new(vertices: impl IntoIterator<Item = Rc<Point>>) -> Rc<Self> {
        let polygon = Rc::new_cyclic(|this| Self {
            hub: NotificationHub::new(POLYGON),
            vertices: vertices.into_iter().collect(),
            bounds: Cell::new(None),
            this: this.clone(),
        });
        for vertex in &polygon.vertices {
            vertex.hub().attach(&polygon);
        }
        polygon
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Rc<Point>] {
        &self.vertices
    }

    /// Returns the bounding box of the vertices.
    ///
    /// Computed on first use after a vertex moved, then cached. An empty
    /// polygon has [`Rect::ZERO`] bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let mut positions = self.vertices.iter().map(|vertex| vertex.position());
        let bounds = match positions.next() {
            Some(first) => positions.fold(Rect::from_points(first, first), |bounds, position| {
                bounds.union_pt(position)
            }),
            None => Rect::ZERO,
        };
        self.bounds.set(Some(bounds));
        bounds
    }

    /// Returns the closed outline through the current vertex positions.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut positions = self.vertices.iter().map(|vertex| vertex.position());
        if let Some(first) = positions.next() {
            path.move_to(first);
            for position in positions {
                path.line_to(position);
            }
            path.close_path();
        }
        path
    }

    /// Moves every vertex by `delta` and signals [`GEOMETRY`] once.
    ///
    /// A vertex listed more than once still moves by `delta` only once.
    ///
    /// The polygon's own hub is frozen while the vertices move, so its
    /// dependents see one change however many vertices there are. Each
    /// vertex still signals its own dependents.
    ///
    /// # Errors
    ///
    /// Propagates the first error from a vertex broadcast or from the final
    /// polygon broadcast. The hub is thawed either way.
    pub fn translate(&self, delta: Vec2) -> Result<(), NotifyError> {
        if delta == Vec2::ZERO {
            return Ok(());
        }
        {
            let _frozen = self.hub.frozen();
            let mut moved: SmallVec<[*const Point; INLINE_VERTICES]> = SmallVec::new();
            for vertex in &self.vertices {
                let addr = Rc::as_ptr(vertex);
                if moved.contains(&addr) {
                    continue;
                }
                moved.push(addr);
                vertex.translate(delta)?;
            }
        }
        self.bounds.set(None);
        self.hub.dirty(GEOMETRY)?;
        Ok(())
    }
}

impl Observable for Polygon {
    fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}

impl DependencyObserver for Polygon {
    fn dependency_dirtied(
        &self,
        component: ComponentKind,
        _: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        if component == POINT && change == GEOMETRY {
            self.bounds.set(None);
            self.hub.dirty(GEOMETRY)?;
        }
        Ok(())
    }
}

impl Drop for Polygon {
    fn drop(&mut self) {
        for vertex in &self.vertices {
            vertex.hub().detach_weak(&self.this);
        }
    }
}
