//! Staged clipboard: one single-use cut/copy slot per entity kind, and
//! paste planning.
//!
//! Slots are not OS-clipboard-style persistent: consuming a slot empties
//! it whether the action was Cut or Copy, so a second paste with no
//! intervening cut/copy is a no-op. The three kinds stage independently;
//! which slot a paste drains is decided by the affordance that triggered
//! it (a menu entry is kind-scoped, the keyboard pastes the most recently
//! staged kind).

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use std::collections::HashSet;

use crate::dispatch::{BatchOrigin, MutationBatch, MutationRequest};
use crate::entity::{Container, EntityKind, EntityRef, FolderId, FolderTree};

/// What a staged slot does on paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipAction {
    /// Paste moves the staged items.
    Cut,
    /// Paste duplicates the staged items.
    Copy,
}

/// One staged entity. The display name rides along so folder duplication
/// can derive its disambiguated copy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipItem {
    pub entity: EntityRef,
    pub name: String,
}

/// A staged payload for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSlot {
    pub action: ClipAction,
    pub items: Vec<ClipItem>,
}

/// Validation failure raised on paste, before any mutation is dispatched.
/// Leaves the slot staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasteError {
    /// A folder cannot be pasted into itself or its own subtree.
    #[error("a folder cannot be pasted into itself or its own subtree")]
    CircularPaste,
}

/// Three independent single-use slot registers, one per kind.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    file: Option<ClipboardSlot>,
    folder: Option<ClipboardSlot>,
    conversation: Option<ClipboardSlot>,
    last_staged: Option<EntityKind>,
}

impl Clipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The staged slot for a kind, if any.
    #[must_use]
    pub fn slot(&self, kind: EntityKind) -> Option<&ClipboardSlot> {
        self.slot_ref(kind).as_ref()
    }

    fn slot_ref(&self, kind: EntityKind) -> &Option<ClipboardSlot> {
        match kind {
            EntityKind::File => &self.file,
            EntityKind::Folder => &self.folder,
            EntityKind::Conversation => &self.conversation,
        }
    }

    fn slot_mut(&mut self, kind: EntityKind) -> &mut Option<ClipboardSlot> {
        match kind {
            EntityKind::File => &mut self.file,
            EntityKind::Folder => &mut self.folder,
            EntityKind::Conversation => &mut self.conversation,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.folder.is_none() && self.conversation.is_none()
    }

    /// Kinds with a staged slot, in fixed kind order.
    #[must_use]
    pub fn staged_kinds(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| self.slot(*kind).is_some())
            .collect()
    }

    /// The kind the keyboard paste targets: the most recently staged kind
    /// whose slot is still loaded, falling back to any staged kind.
    #[must_use]
    pub fn latest_staged_kind(&self) -> Option<EntityKind> {
        match self.last_staged {
            Some(kind) if self.slot(kind).is_some() => Some(kind),
            _ => self.staged_kinds().first().copied(),
        }
    }

    /// Replace a kind's slot with a fresh cut/copy payload. Staging an
    /// empty item list clears the slot instead.
    pub fn stage(&mut self, action: ClipAction, kind: EntityKind, items: Vec<ClipItem>) {
        if items.is_empty() {
            *self.slot_mut(kind) = None;
            return;
        }
        *self.slot_mut(kind) = Some(ClipboardSlot { action, items });
        self.last_staged = Some(kind);
    }

    /// Plan a paste of `kind`'s slot into `target`.
    ///
    /// Returns `Ok(None)` when nothing is staged for the kind. On success
    /// the slot is consumed — single-use regardless of action — and the
    /// batch carries one move (Cut) or duplicate (Copy) per staged item.
    /// Items whose project differs from the destination carry an explicit
    /// cross-project target.
    ///
    /// # Errors
    ///
    /// [`PasteError::CircularPaste`] when a staged folder is pasted into
    /// itself or its own subtree. The slot stays staged.
    pub fn plan_paste(
        &mut self,
        kind: EntityKind,
        target: Container,
        folders: &FolderTree,
    ) -> Result<Option<MutationBatch>, PasteError> {
        let Some(slot) = self.slot_ref(kind) else {
            return Ok(None);
        };
        if kind == EntityKind::Folder {
            if let Some(target_folder) = target.folder_id {
                let staged: HashSet<FolderId> =
                    slot.items.iter().map(|item| item.entity.id).collect();
                if folders.is_or_descends_from(target_folder, &staged) {
                    return Err(PasteError::CircularPaste);
                }
            }
        }
        let Some(slot) = self.slot_mut(kind).take() else {
            return Ok(None);
        };
        let requests = slot
            .items
            .iter()
            .map(|item| plan_item(slot.action, kind, item, target))
            .collect();
        let origin = match slot.action {
            ClipAction::Cut => BatchOrigin::PasteCut { kind },
            ClipAction::Copy => BatchOrigin::PasteCopy { kind },
        };
        Ok(Some(MutationBatch::new(origin, requests)))
    }
}

fn plan_item(
    action: ClipAction,
    kind: EntityKind,
    item: &ClipItem,
    target: Container,
) -> MutationRequest {
    let target_project =
        (item.entity.project_id != target.project_id).then_some(target.project_id);
    match action {
        ClipAction::Cut => MutationRequest::Move {
            id: item.entity.id,
            kind,
            target_folder: target.folder_id,
            target_project,
        },
        ClipAction::Copy => MutationRequest::Duplicate {
            id: item.entity.id,
            kind,
            target_folder: target.folder_id,
            target_project,
            new_name: (kind == EntityKind::Folder).then(|| format!("{} (Copy)", item.name)),
        },
    }
}
