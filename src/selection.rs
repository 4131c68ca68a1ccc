//! Selection model: one kind-partitioned id set and the click rules that
//! merge single and multi selection.
//!
//! "Single selection" and "multi-selection" are two views of the same
//! underlying set. Transitions between them fold rather than discard, so
//! a ctrl-click on a second item keeps the first one selected.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use crate::entity::{EntityId, EntityKind};
use crate::input::Modifiers;

/// The set of currently selected entity identifiers, partitioned by kind.
/// Insertion order is irrelevant; kinds never mix in one partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    files: HashSet<EntityId>,
    folders: HashSet<EntityId>,
    conversations: HashSet<EntityId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection holding exactly one item.
    #[must_use]
    pub fn single(kind: EntityKind, id: EntityId) -> Self {
        let mut set = Self::new();
        set.insert(kind, id);
        set
    }

    /// The ids selected for one kind.
    #[must_use]
    pub fn ids(&self, kind: EntityKind) -> &HashSet<EntityId> {
        match kind {
            EntityKind::File => &self.files,
            EntityKind::Folder => &self.folders,
            EntityKind::Conversation => &self.conversations,
        }
    }

    fn ids_mut(&mut self, kind: EntityKind) -> &mut HashSet<EntityId> {
        match kind {
            EntityKind::File => &mut self.files,
            EntityKind::Folder => &mut self.folders,
            EntityKind::Conversation => &mut self.conversations,
        }
    }

    #[must_use]
    pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
        self.ids(kind).contains(&id)
    }

    /// Total selected count across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len() + self.conversations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an item. Returns whether it was newly added.
    pub fn insert(&mut self, kind: EntityKind, id: EntityId) -> bool {
        self.ids_mut(kind).insert(id)
    }

    /// Remove an item. Returns whether it was present.
    pub fn remove(&mut self, kind: EntityKind, id: EntityId) -> bool {
        self.ids_mut(kind).remove(&id)
    }

    /// Flip an item's membership. Toggling twice restores the prior set.
    pub fn toggle(&mut self, kind: EntityKind, id: EntityId) {
        let ids = self.ids_mut(kind);
        if !ids.remove(&id) {
            ids.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.folders.clear();
        self.conversations.clear();
    }

    /// Replace the whole selection with another.
    pub fn replace(&mut self, other: SelectionSet) {
        *self = other;
    }

    /// All selected `(kind, id)` pairs, kinds in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, EntityId)> + '_ {
        EntityKind::ALL
            .into_iter()
            .flat_map(|kind| self.ids(kind).iter().map(move |id| (kind, *id)))
    }

    /// Ids for one kind in sorted order, for deterministic assertions and
    /// stable request ordering.
    #[must_use]
    pub fn sorted_ids(&self, kind: EntityKind) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.ids(kind).iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Apply the click rules for an item. Returns whether the selection
    /// changed.
    ///
    /// - Plain click on a member of a multi-selection: untouched, so the
    ///   whole group can start a drag.
    /// - Plain click anywhere else: collapse to exactly the clicked item.
    /// - Ctrl/Cmd+click: toggle membership.
    /// - Shift+click: add, never remove.
    pub fn click(&mut self, kind: EntityKind, id: EntityId, modifiers: Modifiers) -> bool {
        if modifiers.additive() {
            self.toggle(kind, id);
            return true;
        }
        if modifiers.shift {
            return self.insert(kind, id);
        }
        if self.contains(kind, id) {
            // Member of the current selection: leave it untouched so a
            // multi-selection can start a group drag. A sole selected
            // item collapses to itself, which is the same state.
            return false;
        }
        self.replace(Self::single(kind, id));
        true
    }
}
