// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The notification hub: dependents, dirty broadcast, and freeze scopes.

use alloc::rc::{Rc, Weak};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::mem;

use crate::error::NotifyError;
use crate::kind::{ChangeKind, ComponentKind};
use crate::observer::DependencyObserver;
use crate::trace::trace_event;

type Handle = Weak<dyn DependencyObserver>;

/// Address of the observer behind a handle, without its vtable.
#[inline]
fn handle_addr(handle: &Handle) -> *const () {
    handle.as_ptr().cast::<()>()
}

/// Deflated dependent storage.
///
/// A single dependent is held directly; only a second attachment allocates a
/// list. `Many` always holds at least two handles.
#[derive(Debug, Default)]
enum Dependents {
    #[default]
    Empty,
    One(Handle),
    Many(Vec<Handle>),
}

impl Dependents {
    fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(all) => all.len(),
        }
    }

    fn get(&self, index: usize) -> Option<Handle> {
        match self {
            Self::Empty => None,
            Self::One(only) => (index == 0).then(|| only.clone()),
            Self::Many(all) => all.get(index).cloned(),
        }
    }

    fn push(&mut self, handle: Handle) {
        *self = match mem::take(self) {
            Self::Empty => Self::One(handle),
            Self::One(first) => Self::Many(vec![first, handle]),
            Self::Many(mut all) => {
                all.push(handle);
                Self::Many(all)
            }
        };
    }

    /// Removes the first handle pointing at `target` and returns its index.
    ///
    /// Returns `None`, leaving storage untouched, when nothing matches.
    fn remove(&mut self, target: *const ()) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::One(only) => {
                if handle_addr(only) != target {
                    return None;
                }
                *self = Self::Empty;
                Some(0)
            }
            Self::Many(all) => {
                let pos = all.iter().position(|h| handle_addr(h) == target)?;
                // Order of the survivors is broadcast order, so no swap_remove.
                all.remove(pos);
                if all.len() == 1 {
                    let remaining = all.swap_remove(0);
                    *self = Self::One(remaining);
                }
                Some(pos)
            }
        }
    }

    fn contains(&self, target: *const ()) -> bool {
        match self {
            Self::Empty => false,
            Self::One(only) => handle_addr(only) == target,
            Self::Many(all) => all.iter().any(|h| handle_addr(h) == target),
        }
    }

    fn storage(&self) -> DependentStorage {
        match self {
            Self::Empty => DependentStorage::Empty,
            Self::One(_) => DependentStorage::One,
            Self::Many(_) => DependentStorage::Many,
        }
    }
}

/// Which representation a hub currently uses for its dependents.
///
/// A hub is `Empty` with zero dependents, `One` with exactly one, and `Many`
/// with two or more.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DependentStorage {
    /// No dependents.
    Empty,
    /// A single dependent held directly.
    One,
    /// Two or more dependents held in attachment order.
    Many,
}

/// Broadcasts dirty signals from one object to the objects that depend on it.
///
/// Embed a hub in any object that others should be able to observe (a point,
/// a brush, a scene entity). Dependents register with [`attach`](Self::attach)
/// and receive a [`DependencyObserver::dependency_dirtied`] call every time the
/// owner calls [`dirty`](Self::dirty).
///
/// The hub holds its dependents weakly: it never keeps an observer alive, and
/// an observer that goes away must [`detach`](Self::detach) first.
///
/// All methods take `&self`, so observers may attach, detach, or re-dirty the
/// hub from inside their callback.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use trellis_notify::{
///     ChangeKind, ComponentKind, DependencyObserver, NotificationHub, NotifyError,
/// };
///
/// const POINT: ComponentKind = ComponentKind::new(1);
/// const GEOMETRY: ChangeKind = ChangeKind::new(0);
///
/// #[derive(Default)]
/// struct Counter(Cell<u32>);
///
/// impl DependencyObserver for Counter {
///     fn dependency_dirtied(
///         &self,
///         _: ComponentKind,
///         _: &NotificationHub,
///         _: ChangeKind,
///     ) -> Result<(), NotifyError> {
///         self.0.set(self.0.get() + 1);
///         Ok(())
///     }
/// }
///
/// let hub = NotificationHub::new(POINT);
/// let counter = Rc::new(Counter::default());
/// hub.attach(&counter);
///
/// hub.dirty(GEOMETRY).unwrap();
/// assert_eq!(counter.0.get(), 1);
///
/// // Suppressed while frozen, and not replayed afterwards.
/// {
///     let _frozen = hub.frozen();
///     hub.dirty(GEOMETRY).unwrap();
/// }
/// assert_eq!(counter.0.get(), 1);
///
/// hub.detach(&counter);
/// assert_eq!(hub.dependent_count(), 0);
/// ```
#[derive(Debug)]
pub struct NotificationHub {
    component: ComponentKind,
    dependents: RefCell<Dependents>,
    /// Next index to visit for each walk in progress, innermost last.
    cursors: RefCell<Vec<usize>>,
    /// Freeze nesting depth; signals are dropped while non-zero.
    frozen: Cell<u32>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(ComponentKind::ANONYMOUS)
    }
}

impl NotificationHub {
    /// Creates a hub with no dependents that broadcasts as `component`.
    #[must_use]
    pub fn new(component: ComponentKind) -> Self {
        Self {
            component,
            dependents: RefCell::new(Dependents::Empty),
            cursors: RefCell::new(Vec::new()),
            frozen: Cell::new(0),
        }
    }

    /// Returns the component kind passed to observers on every broadcast.
    #[must_use]
    pub fn component(&self) -> ComponentKind {
        self.component
    }

    /// Returns `true` if `other` is this very hub.
    ///
    /// Observers use this to tell which of their sources is calling.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }

    /// Returns the number of attached dependents.
    ///
    /// An observer attached twice counts twice.
    #[must_use]
    pub fn dependent_count(&self) -> usize {
        self.dependents.borrow().len()
    }

    /// Returns `true` if at least one dependent is attached.
    #[must_use]
    pub fn has_dependents(&self) -> bool {
        self.dependent_count() > 0
    }

    /// Returns the current storage representation.
    #[must_use]
    pub fn storage(&self) -> DependentStorage {
        self.dependents.borrow().storage()
    }

    /// Returns `true` if `observer` is attached at least once.
    #[must_use]
    pub fn is_attached<O: DependencyObserver + ?Sized>(&self, observer: &Rc<O>) -> bool {
        self.dependents
            .borrow()
            .contains(Rc::as_ptr(observer).cast::<()>())
    }

    /// Attaches `observer` as a dependent.
    ///
    /// No deduplication is done: attaching the same observer twice delivers
    /// every signal to it twice.
    pub fn attach<O: DependencyObserver>(&self, observer: &Rc<O>) {
        let handle: Weak<O> = Rc::downgrade(observer);
        self.attach_weak(handle);
    }

    /// Attaches an already-downgraded observer handle.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the observer behind `observer` has already
    /// been dropped. Such a dependent could never be informed.
    pub fn attach_weak(&self, observer: Weak<dyn DependencyObserver>) {
        debug_assert!(
            observer.strong_count() > 0,
            "attached a dependent that has already been dropped"
        );
        self.dependents.borrow_mut().push(observer);
        trace_event!(
            component = ?self.component,
            dependents = self.dependent_count(),
            "dependent attached"
        );
    }

    /// Detaches one attachment of `observer`.
    ///
    /// Returns `true` if an entry was removed. Detaching an observer that is
    /// not attached, or detaching from an empty hub, changes nothing.
    pub fn detach<O: DependencyObserver + ?Sized>(&self, observer: &Rc<O>) -> bool {
        self.detach_addr(Rc::as_ptr(observer).cast::<()>())
    }

    /// Detaches one attachment of the observer behind `observer`.
    ///
    /// This works even after the observer itself has been dropped, which is
    /// how owners clean up from inside their own `Drop`.
    pub fn detach_weak<O: ?Sized>(&self, observer: &Weak<O>) -> bool {
        self.detach_addr(observer.as_ptr().cast::<()>())
    }

    fn detach_addr(&self, target: *const ()) -> bool {
        let removed = self.dependents.borrow_mut().remove(target);
        if let Some(pos) = removed {
            // Walks already past `pos` would otherwise skip an entry.
            for cursor in self.cursors.borrow_mut().iter_mut() {
                if pos < *cursor {
                    *cursor -= 1;
                }
            }
        }
        let removed = removed.is_some();
        trace_event!(
            component = ?self.component,
            removed,
            dependents = self.dependent_count(),
            "dependent detached"
        );
        removed
    }

    /// Signals that the owner changed in the way described by `change`.
    ///
    /// Broadcasts to every dependent unless the hub is frozen, in which case
    /// the signal is dropped. Nothing is queued for replay on unfreeze.
    ///
    /// Returns the hub for chaining.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while informing dependents; see
    /// [`inform_dependents`](Self::inform_dependents).
    pub fn dirty(&self, change: ChangeKind) -> Result<&Self, NotifyError> {
        if self.is_frozen() {
            trace_event!(component = ?self.component, ?change, "dirty suppressed");
            return Ok(self);
        }
        self.inform_dependents(change)?;
        Ok(self)
    }

    /// Calls every dependent's callback in attachment order, ignoring freeze.
    ///
    /// Dependents are visited by a live index and no borrow is held across a
    /// callback, so a callback may attach or detach dependents on this hub.
    /// Dependents attached during the pass are informed in the same pass.
    /// Detaching steps the index back as needed, so a dependent that stays
    /// attached is never skipped, and one detached before its turn is not
    /// informed.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::DroppedObserver`] if a dependent was dropped
    /// without detaching, or the error returned by a failing callback. Either
    /// way the remaining dependents are not informed.
    pub fn inform_dependents(&self, change: ChangeKind) -> Result<(), NotifyError> {
        trace_event!(
            component = ?self.component,
            ?change,
            dependents = self.dependent_count(),
            "broadcast"
        );
        self.walk(|handle| {
            let observer = handle.upgrade().ok_or(NotifyError::DroppedObserver {
                component: self.component,
            })?;
            observer.dependency_dirtied(self.component, self, change)
        })
    }

    /// Applies `f` to each live dependent in attachment order.
    ///
    /// This is not a notification: freeze state is ignored and dependents
    /// that have been dropped are skipped. The same re-entrancy rules as
    /// [`inform_dependents`](Self::inform_dependents) apply.
    pub fn for_each_dependent(&self, mut f: impl FnMut(&dyn DependencyObserver)) {
        let _ = self.walk(|handle| {
            if let Some(observer) = handle.upgrade() {
                f(&*observer);
            }
            Ok(())
        });
    }

    /// Visits dependents in order with a cursor that detaching keeps valid.
    ///
    /// Walks nest strictly, so the walk owns the last cursor for its whole
    /// duration.
    fn walk(
        &self,
        mut visit: impl FnMut(Handle) -> Result<(), NotifyError>,
    ) -> Result<(), NotifyError> {
        self.cursors.borrow_mut().push(0);
        let result = loop {
            let Some(handle) = self.advance_cursor() else {
                break Ok(());
            };
            if let Err(err) = visit(handle) {
                break Err(err);
            }
        };
        self.cursors.borrow_mut().pop();
        result
    }

    fn advance_cursor(&self) -> Option<Handle> {
        let mut cursors = self.cursors.borrow_mut();
        let cursor = cursors.last_mut()?;
        let handle = self.dependents.borrow().get(*cursor)?;
        *cursor += 1;
        Some(handle)
    }

    /// Returns `true` while at least one freeze scope is open.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.get() > 0
    }

    /// Returns the number of open freeze scopes.
    #[must_use]
    pub fn freeze_depth(&self) -> u32 {
        self.frozen.get()
    }

    /// Opens a freeze scope. Every call must be matched by [`unfreeze`](Self::unfreeze).
    ///
    /// Prefer [`frozen`](Self::frozen), which closes the scope on drop.
    pub fn freeze(&self) {
        self.frozen.set(self.frozen.get() + 1);
    }

    /// Closes a freeze scope.
    ///
    /// This does not broadcast: call [`dirty`](Self::dirty) afterwards if the
    /// suppressed changes must still be observed.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no freeze scope is open. Release builds
    /// leave the depth at zero.
    pub fn unfreeze(&self) {
        let depth = self.frozen.get();
        debug_assert!(depth > 0, "unfreeze without a matching freeze");
        self.frozen.set(depth.saturating_sub(1));
    }

    /// Opens a freeze scope that closes when the returned guard is dropped.
    pub fn frozen(&self) -> FreezeGuard<'_> {
        self.freeze();
        FreezeGuard { hub: self }
    }
}

/// Keeps a [`NotificationHub`] frozen until dropped.
///
/// Returned by [`NotificationHub::frozen`].
#[derive(Debug)]
#[must_use = "the hub unfreezes as soon as the guard is dropped"]
pub struct FreezeGuard<'a> {
    hub: &'a NotificationHub,
}

impl FreezeGuard<'_> {
    /// Returns the frozen hub.
    #[must_use]
    pub fn hub(&self) -> &NotificationHub {
        self.hub
    }
}

impl Drop for FreezeGuard<'_> {
    fn drop(&mut self) {
        self.hub.unfreeze();
    }
}
