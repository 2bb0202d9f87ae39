// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component and change kinds carried by every broadcast.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Tags the kind of object that is broadcasting (point, brush, entity, ...).
///
/// Every [`NotificationHub`](crate::NotificationHub) carries one component
/// kind, which it passes to its observers alongside the [`ChangeKind`].
/// Crates define their own tags as constants:
///
/// ```
/// use trellis_notify::ComponentKind;
///
/// const POINT: ComponentKind = ComponentKind::new(1);
/// const BRUSH: ComponentKind = ComponentKind::new(2);
///
/// assert_ne!(POINT, BRUSH);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKind(u16);

impl ComponentKind {
    /// A component kind for hubs that do not care to be told apart.
    pub const ANONYMOUS: Self = Self(0);

    /// Creates a component kind from a raw tag.
    #[must_use]
    pub const fn new(tag: u16) -> Self {
        Self(tag)
    }

    /// Returns the raw tag.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentKind").field(&self.0).finish()
    }
}

/// Discriminates what changed in a dirty signal (geometry, style, content, ...).
///
/// A change kind is a single `u8` below 64 so that kinds can be collected
/// into a [`ChangeSet`]. Observers use it to react selectively: a text box
/// re-wraps on content or width changes but ignores a colour change.
///
/// # Example
///
/// ```
/// use trellis_notify::ChangeKind;
///
/// const GEOMETRY: ChangeKind = ChangeKind::new(0);
/// const STYLE: ChangeKind = ChangeKind::new(1);
/// ```
///
/// # See Also
///
/// - [`ChangeSet`]: A compact set of change kinds.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChangeKind(u8);

impl ChangeKind {
    /// Creates a new change kind with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 64`, as [`ChangeSet`] only supports 64 kinds.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 64, "ChangeKind index must be less than 64");
        Self(index)
    }

    /// Returns the index of this change kind.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Converts this kind into a single-element [`ChangeSet`].
    #[must_use]
    pub const fn into_set(self) -> ChangeSet {
        ChangeSet(1_u64 << self.0)
    }
}

impl fmt::Debug for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChangeKind").field(&self.0).finish()
    }
}

/// A compact bitfield representing a set of up to 64 change kinds.
///
/// Observers use a `ChangeSet` as a filter ("which kinds do I react to?"),
/// and accumulators use it to remember everything that changed on an object
/// since the last redraw.
///
/// # Example
///
/// ```
/// use trellis_notify::{ChangeKind, ChangeSet};
///
/// const GEOMETRY: ChangeKind = ChangeKind::new(0);
/// const STYLE: ChangeKind = ChangeKind::new(1);
/// const CONTENT: ChangeKind = ChangeKind::new(2);
///
/// let mut pending = ChangeSet::empty();
/// pending.insert(GEOMETRY);
/// pending |= STYLE.into_set();
///
/// assert!(pending.contains(GEOMETRY));
/// assert!(pending.contains(STYLE));
/// assert!(!pending.contains(CONTENT));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChangeSet(u64);

impl ChangeSet {
    /// An empty change set.
    pub const EMPTY: Self = Self(0);

    /// A change set containing all 64 possible kinds.
    pub const ALL: Self = Self(u64::MAX);

    /// Creates an empty change set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Creates a change set from a list of kinds.
    #[must_use]
    pub const fn of(kinds: &[ChangeKind]) -> Self {
        let mut bits = 0_u64;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1_u64 << kinds[i].0;
            i += 1;
        }
        Self(bits)
    }

    /// Returns `true` if this set contains no kinds.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this set contains the given kind.
    #[must_use]
    pub const fn contains(self, kind: ChangeKind) -> bool {
        (self.0 & (1_u64 << kind.0)) != 0
    }

    /// Inserts a kind into the set.
    pub fn insert(&mut self, kind: ChangeKind) {
        self.0 |= 1_u64 << kind.0;
    }

    /// Returns the number of kinds in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns an iterator over the kinds in this set, lowest index first.
    #[must_use]
    pub const fn iter(self) -> ChangeSetIter {
        ChangeSetIter { bits: self.0 }
    }
}

impl fmt::Debug for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for ChangeSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl From<ChangeKind> for ChangeSet {
    fn from(kind: ChangeKind) -> Self {
        kind.into_set()
    }
}

impl IntoIterator for ChangeSet {
    type Item = ChangeKind;
    type IntoIter = ChangeSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the kinds in a [`ChangeSet`].
#[derive(Clone, Debug)]
pub struct ChangeSetIter {
    bits: u64,
}

impl Iterator for ChangeSetIter {
    type Item = ChangeKind;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, reason = "trailing_zeros <= 63")]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(ChangeKind(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for ChangeSetIter {}
