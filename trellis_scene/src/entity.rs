// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entities: drawable aggregates of observable components.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use trellis_notify::{
    ChangeKind, ComponentKind, DependencyObserver, NotificationHub, NotifyError, Observable,
};

use crate::kind::{ENTITY, TRANSFORM};

/// Identifier for an [`Entity`], chosen by the caller.
///
/// Ids order the redraw list returned by [`Stage::drain_dirty`](crate::Stage::drain_dirty).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// A drawable thing made of observable components.
///
/// Components can be anything [`Observable`]: a [`Polygon`](crate::Polygon),
/// a [`Brush`](crate::Brush), a text box. The entity attaches itself to each
/// one and re-broadcasts every change it hears as an [`ENTITY`] change of
/// the same kind, so a single observer of the entity learns about any of its
/// parts.
pub struct Entity {
    hub: NotificationHub,
    id: EntityId,
    visible: Cell<bool>,
    components: RefCell<Vec<Rc<dyn Observable>>>,
    this: Weak<Self>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("hub", &self.hub)
            .field("id", &self.id)
            .field("visible", &self.visible.get())
            .field("components", &self.component_count())
            .finish_non_exhaustive()
    }
}

impl Entity {
    /// Creates a visible entity with no components.
    pub fn new(id: EntityId) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            hub: NotificationHub::new(ENTITY),
            id,
            visible: Cell::new(true),
            components: RefCell::default(),
            this: this.clone(),
        })
    }

    /// Returns the entity's id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns whether the entity should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Shows or hides the entity, signalling [`TRANSFORM`] on a change.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast.
    pub fn set_visible(&self, visible: bool) -> Result<(), NotifyError> {
        if self.visible.replace(visible) != visible {
            self.hub.dirty(TRANSFORM)?;
        }
        Ok(())
    }

    /// Adds a component and starts observing it.
    pub fn add_component(&self, component: Rc<dyn Observable>) {
        component.hub().attach_weak(self.this.clone());
        self.components.borrow_mut().push(component);
    }

    /// Removes a component and stops observing it.
    ///
    /// Returns `false` if `component` is not part of this entity.
    pub fn remove_component(&self, component: &Rc<dyn Observable>) -> bool {
        let mut components = self.components.borrow_mut();
        let Some(index) = components.iter().position(|c| Rc::ptr_eq(c, component)) else {
            return false;
        };
        let removed = components.remove(index);
        drop(components);
        removed.hub().detach_weak(&self.this);
        true
    }

    /// Returns the number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.borrow().len()
    }
}

impl Observable for Entity {
    fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}

impl DependencyObserver for Entity {
    fn dependency_dirtied(
        &self,
        _: ComponentKind,
        _: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        self.hub.dirty(change)?;
        Ok(())
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        for component in self.components.get_mut().iter() {
            component.hub().detach_weak(&self.this);
        }
    }
}
