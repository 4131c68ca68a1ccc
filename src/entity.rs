//! Entity model: kinds, references, visible items, container identity,
//! and the folder parent links behind the circular-move guards.
//!
//! Data flows into this layer from the item provider (the rendering/data
//! layer supplies the visible rows of the current container plus folder
//! parent links) and out through [`crate::dispatch`] as mutation requests.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rect;

/// Unique identifier for a file, folder, or conversation.
pub type EntityId = Uuid;

/// Identifier of a folder container.
pub type FolderId = Uuid;

/// Identifier of a project.
pub type ProjectId = Uuid;

/// The kind of a workspace entity.
///
/// Kinds may share id values in the backing store; identity is always the
/// `(kind, id)` pair and every engine operation is kind-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    File,
    Folder,
    Conversation,
}

impl EntityKind {
    /// All kinds, in the fixed order used for menus and iteration.
    pub const ALL: [EntityKind; 3] = [Self::File, Self::Folder, Self::Conversation];

    /// Lowercase singular label for user-visible text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Conversation => "conversation",
        }
    }

    /// Capitalized singular label for sentence-leading text.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Folder => "Folder",
            Self::Conversation => "Conversation",
        }
    }

    /// Lowercase plural label for user-visible text.
    #[must_use]
    pub fn label_plural(self) -> &'static str {
        match self {
            Self::File => "files",
            Self::Folder => "folders",
            Self::Conversation => "conversations",
        }
    }
}

/// A reference to a workspace entity as supplied by the item provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Containing folder; `None` for entities at the project root.
    pub parent_folder_id: Option<FolderId>,
    pub project_id: ProjectId,
}

/// A visible row in the container view.
///
/// `rect` is the row's bounding box in container-local, scroll-adjusted
/// coordinates, recomputed by the rendering layer after layout. `name` is
/// carried so folder duplication can derive a disambiguated copy name
/// without a second provider round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub entity: EntityRef,
    pub name: String,
    pub rect: Rect,
}

/// The currently displayed container: a folder, or a project root when
/// `folder_id` is `None`. Selection does not survive a container change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub project_id: ProjectId,
    pub folder_id: Option<FolderId>,
}

/// Folder parent links, as supplied by the item provider.
///
/// Backs the ancestor walk behind the circular move/paste guards: a folder
/// may not be dropped or pasted into itself or anything beneath it.
#[derive(Debug, Clone, Default)]
pub struct FolderTree {
    parents: HashMap<FolderId, Option<FolderId>>,
}

impl FolderTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all parent links with a fresh provider snapshot.
    pub fn load(&mut self, parents: impl IntoIterator<Item = (FolderId, Option<FolderId>)>) {
        self.parents = parents.into_iter().collect();
    }

    /// Record or update a single folder's parent link.
    pub fn set_parent(&mut self, folder: FolderId, parent: Option<FolderId>) {
        self.parents.insert(folder, parent);
    }

    /// The parent of `folder`, or `None` when it sits at a project root
    /// or is unknown to the tree.
    #[must_use]
    pub fn parent(&self, folder: FolderId) -> Option<FolderId> {
        self.parents.get(&folder).copied().flatten()
    }

    /// Whether `folder` is one of `roots`, or lies anywhere beneath one.
    ///
    /// The walk visits each folder at most once, so a malformed parent map
    /// containing a cycle terminates instead of hanging.
    #[must_use]
    pub fn is_or_descends_from(&self, folder: FolderId, roots: &HashSet<FolderId>) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(folder);
        while let Some(f) = current {
            if roots.contains(&f) {
                return true;
            }
            if !seen.insert(f) {
                break;
            }
            current = self.parent(f);
        }
        false
    }
}
