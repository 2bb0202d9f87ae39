// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The root observer that collects per-entity changes between frames.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use trellis_notify::{
    ChangeKind, ChangeSet, ComponentKind, DependencyObserver, NotificationHub, NotifyError,
    Observable,
};

use crate::entity::{Entity, EntityId};
use crate::kind::ENTITY;
use crate::trace::debug_event;

fn hub_key(hub: &NotificationHub) -> usize {
    core::ptr::from_ref(hub).addr()
}

#[derive(Default)]
struct StageState {
    entities: HashMap<EntityId, Rc<Entity>>,
    /// Entity hub address to id, to identify the source of a signal.
    by_hub: HashMap<usize, EntityId>,
    dirty: HashMap<EntityId, ChangeSet>,
}

/// The root observer: collects which entities changed, and how, between
/// frames.
///
/// ```
/// use std::rc::Rc;
///
/// use trellis_scene::{Entity, EntityId, Point, Stage, GEOMETRY, TRANSFORM};
///
/// let stage = Stage::new();
/// let point = Rc::new(Point::new((0.0, 0.0)));
/// let marker = Entity::new(EntityId(3));
/// marker.add_component(point.clone());
/// stage.add(marker.clone());
/// stage.drain_dirty();
///
/// point.set((1.0, 1.0)).unwrap();
/// marker.set_visible(false).unwrap();
///
/// let dirty = stage.drain_dirty();
/// assert_eq!(dirty.len(), 1);
/// assert_eq!(dirty[0].0, EntityId(3));
/// assert!(dirty[0].1.contains(GEOMETRY) && dirty[0].1.contains(TRANSFORM));
/// assert!(stage.drain_dirty().is_empty());
/// ```
pub struct Stage {
    state: RefCell<StageState>,
    this: Weak<Self>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Stage")
            .field("entities", &state.entities.len())
            .field("dirty", &state.dirty.len())
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// Creates an empty stage.
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            state: RefCell::default(),
            this: this.clone(),
        })
    }

    /// Adds `entity` and starts observing it.
    ///
    /// A new entity is reported dirty with [`ChangeSet::ALL`] on the next
    /// drain so it gets drawn once. Adding an id that is already present
    /// replaces the old entity, which is returned.
    pub fn add(&self, entity: Rc<Entity>) -> Option<Rc<Entity>> {
        let id = entity.id();
        let replaced = self.remove(id);
        entity.hub().attach_weak(self.this.clone());
        let mut state = self.state.borrow_mut();
        state.by_hub.insert(hub_key(entity.hub()), id);
        state.entities.insert(id, entity);
        state.dirty.insert(id, ChangeSet::ALL);
        replaced
    }

    /// Removes the entity with `id` and stops observing it.
    ///
    /// Any pending changes for it are discarded.
    pub fn remove(&self, id: EntityId) -> Option<Rc<Entity>> {
        let mut state = self.state.borrow_mut();
        let entity = state.entities.remove(&id)?;
        state.by_hub.remove(&hub_key(entity.hub()));
        state.dirty.remove(&id);
        drop(state);
        entity.hub().detach_weak(&self.this);
        Some(entity)
    }

    /// Returns the entity with `id`.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<Rc<Entity>> {
        self.state.borrow().entities.get(&id).cloned()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entities.len()
    }

    /// Returns `true` if the stage has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if any entity changed since the last drain.
    #[must_use]
    pub fn has_dirty(&self) -> bool {
        !self.state.borrow().dirty.is_empty()
    }

    /// Takes the accumulated changes, in ascending id order.
    ///
    /// Each changed entity appears once with the union of every kind it
    /// signalled since the last drain.
    pub fn drain_dirty(&self) -> Vec<(EntityId, ChangeSet)> {
        let mut dirty: Vec<_> = self.state.borrow_mut().dirty.drain().collect();
        dirty.sort_unstable_by_key(|&(id, _)| id);
        debug_event!(entities = dirty.len(), "stage drained");
        dirty
    }
}

impl DependencyObserver for Stage {
    fn dependency_dirtied(
        &self,
        component: ComponentKind,
        source: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        if component != ENTITY {
            return Ok(());
        }
        let mut state = self.state.borrow_mut();
        if let Some(&id) = state.by_hub.get(&hub_key(source)) {
            *state.dirty.entry(id).or_default() |= change.into_set();
        }
        Ok(())
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        for entity in self.state.get_mut().entities.values() {
            entity.hub().detach_weak(&self.this);
        }
    }
}
