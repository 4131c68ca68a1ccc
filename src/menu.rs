//! Context-menu scope resolution: whether a menu targets the whole
//! multi-selection, one collapsed item, or the container itself, and
//! which paste affordances the clipboard currently supports.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::clipboard::Clipboard;
use crate::entity::{EntityKind, EntityRef, FolderId};
use crate::selection::SelectionSet;

/// Per-kind counts of a selection, for bulk menu labels such as
/// "Cut (3 files)".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts {
    pub files: usize,
    pub folders: usize,
    pub conversations: usize,
}

impl KindCounts {
    #[must_use]
    pub fn of(selection: &SelectionSet) -> Self {
        Self {
            files: selection.ids(EntityKind::File).len(),
            folders: selection.ids(EntityKind::Folder).len(),
            conversations: selection.ids(EntityKind::Conversation).len(),
        }
    }

    #[must_use]
    pub fn count(self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::File => self.files,
            EntityKind::Folder => self.folders,
            EntityKind::Conversation => self.conversations,
        }
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.files + self.folders + self.conversations
    }

    /// Count-aware summary of the non-empty kinds, in fixed kind order,
    /// e.g. `"3 files, 1 folder"`.
    #[must_use]
    pub fn summary(self) -> String {
        let mut parts = Vec::new();
        for kind in EntityKind::ALL {
            match self.count(kind) {
                0 => {}
                1 => parts.push(format!("1 {}", kind.label())),
                n => parts.push(format!("{n} {}", kind.label_plural())),
            }
        }
        parts.join(", ")
    }
}

/// What the opened menu operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScope {
    /// Bulk actions over the whole multi-selection, grouped and counted
    /// per kind.
    Selection { counts: KindCounts },
    /// Actions for one item.
    Single { entity: EntityRef },
    /// Empty-space menu for the container itself.
    Container,
}

/// Data model for a context menu; the rendering layer draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    pub scope: MenuScope,
    /// One paste entry per staged kind, fixed kind order. Empty means the
    /// paste entry renders as a disabled placeholder.
    pub paste_kinds: Vec<EntityKind>,
    /// Present on a folder item's menu when the file slot is staged:
    /// paste the staged files straight into this folder without
    /// navigating into it.
    pub paste_files_into: Option<FolderId>,
}

/// Resolve a right-click on an item. A member of the active
/// multi-selection scopes the menu to the whole selection; any other
/// item collapses the selection to itself before the menu opens.
pub fn resolve_item_menu(
    entity: EntityRef,
    selection: &mut SelectionSet,
    clipboard: &Clipboard,
) -> MenuModel {
    let scope = if selection.contains(entity.kind, entity.id) && selection.len() > 1 {
        MenuScope::Selection {
            counts: KindCounts::of(selection),
        }
    } else {
        selection.replace(SelectionSet::single(entity.kind, entity.id));
        MenuScope::Single { entity }
    };
    let paste_files_into = (entity.kind == EntityKind::Folder
        && clipboard.slot(EntityKind::File).is_some())
    .then_some(entity.id);
    MenuModel {
        scope,
        paste_kinds: clipboard.staged_kinds(),
        paste_files_into,
    }
}

/// Resolve a right-click on empty container space: the selection clears
/// and the menu offers a paste entry per staged slot.
pub fn resolve_container_menu(
    selection: &mut SelectionSet,
    clipboard: &Clipboard,
) -> MenuModel {
    selection.clear();
    MenuModel {
        scope: MenuScope::Container,
        paste_kinds: clipboard.staged_kinds(),
        paste_files_into: None,
    }
}
