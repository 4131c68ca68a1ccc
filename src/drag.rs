//! Drag-transfer sessions: the typed drag subject, the frozen id
//! snapshot, and drop validation.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::collections::HashSet;

use uuid::Uuid;

use crate::entity::{EntityId, EntityKind, FolderId, FolderTree};
use crate::selection::SelectionSet;

/// The typed payload identifying what is being dragged. A session carries
/// exactly one kind; mixed-kind drags do not occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSubject {
    File(EntityId),
    Folder(EntityId),
    Conversation(EntityId),
}

impl DragSubject {
    #[must_use]
    pub fn kind(self) -> EntityKind {
        match self {
            Self::File(_) => EntityKind::File,
            Self::Folder(_) => EntityKind::Folder,
            Self::Conversation(_) => EntityKind::Conversation,
        }
    }

    #[must_use]
    pub fn id(self) -> EntityId {
        match self {
            Self::File(id) | Self::Folder(id) | Self::Conversation(id) => id,
        }
    }
}

/// Validation failure raised on drop, before any mutation is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    /// A folder cannot be moved into itself or its own subtree.
    #[error("a folder cannot be moved into itself or its own subtree")]
    CircularMove,
}

/// What a drop resolves to. Only `Move` reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropVerdict {
    /// No valid target under the pointer. Selection preserved, nothing
    /// dispatched.
    Cancelled,
    /// Every dragged item already lives in the target folder: success
    /// with no mutation, no network call, no notice.
    AlreadyThere,
    /// Rejected before dispatch; state unchanged.
    Rejected(DropError),
    /// Dispatch one move per dragged id.
    Move {
        target: FolderId,
        ids: Vec<EntityId>,
    },
}

/// An in-flight drag. Created at drag start from a frozen snapshot of the
/// selection, destroyed at drop or cancel.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Session identifier, for log correlation only.
    pub id: Uuid,
    pub subject: DragSubject,
    /// Frozen for the session's lifetime; later selection changes do not
    /// alter what this drag moves.
    pub dragged_ids: HashSet<EntityId>,
    /// The folder currently under the pointer, when it is a valid target.
    pub over_target: Option<FolderId>,
}

impl DragSession {
    /// Start a session. When the selection of the subject's kind contains
    /// the subject, the entire kind-scoped selection is snapshotted so
    /// the whole group moves; otherwise just the subject.
    #[must_use]
    pub fn begin(subject: DragSubject, selection: &SelectionSet) -> Self {
        let kind = subject.kind();
        let dragged_ids = if selection.contains(kind, subject.id()) {
            selection.ids(kind).clone()
        } else {
            HashSet::from([subject.id()])
        };
        Self {
            id: Uuid::new_v4(),
            subject,
            dragged_ids,
            over_target: None,
        }
    }

    /// Validate a drop onto `target`, in order: no target cancels; a
    /// folder drag into itself or its own subtree is rejected; a drop
    /// where every item already has the target as parent is a no-op
    /// success; anything else plans one move per dragged id.
    ///
    /// `parent_of` reports each dragged item's current parent folder;
    /// `folders` backs the ancestor walk for the cycle guard.
    #[must_use]
    pub fn validate_drop(
        &self,
        target: Option<FolderId>,
        parent_of: impl Fn(EntityId) -> Option<FolderId>,
        folders: &FolderTree,
    ) -> DropVerdict {
        let Some(target) = target else {
            return DropVerdict::Cancelled;
        };
        if self.subject.kind() == EntityKind::Folder
            && folders.is_or_descends_from(target, &self.dragged_ids)
        {
            return DropVerdict::Rejected(DropError::CircularMove);
        }
        if self
            .dragged_ids
            .iter()
            .all(|id| parent_of(*id) == Some(target))
        {
            return DropVerdict::AlreadyThere;
        }
        let mut ids: Vec<EntityId> = self.dragged_ids.iter().copied().collect();
        ids.sort_unstable();
        DropVerdict::Move { target, ids }
    }
}
