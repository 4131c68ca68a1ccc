use uuid::Uuid;

use crate::dispatch::{BatchOrigin, MutationRequest};

use super::*;

fn eid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

const PROJECT: u128 = 900;
const OTHER_PROJECT: u128 = 901;

fn clip(n: u128, kind: EntityKind) -> ClipItem {
    clip_in_project(n, kind, PROJECT)
}

fn clip_in_project(n: u128, kind: EntityKind, project: u128) -> ClipItem {
    ClipItem {
        entity: EntityRef {
            id: eid(n),
            kind,
            parent_folder_id: Some(eid(50)),
            project_id: eid(project),
        },
        name: format!("item-{n}"),
    }
}

fn target(folder: Option<u128>) -> Container {
    Container {
        project_id: eid(PROJECT),
        folder_id: folder.map(eid),
    }
}

// =============================================================
// Staging
// =============================================================

#[test]
fn new_clipboard_is_empty() {
    let c = Clipboard::new();
    assert!(c.is_empty());
    assert!(c.staged_kinds().is_empty());
    assert_eq!(c.latest_staged_kind(), None);
}

#[test]
fn stage_loads_one_kind_slot() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    let slot = c.slot(EntityKind::File).unwrap();
    assert_eq!(slot.action, ClipAction::Cut);
    assert_eq!(slot.items.len(), 1);
    assert!(c.slot(EntityKind::Folder).is_none());
}

#[test]
fn stage_replaces_prior_slot_of_same_kind() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    c.stage(ClipAction::Copy, EntityKind::File, vec![clip(2, EntityKind::File)]);
    let slot = c.slot(EntityKind::File).unwrap();
    assert_eq!(slot.action, ClipAction::Copy);
    assert_eq!(slot.items[0].entity.id, eid(2));
}

#[test]
fn kinds_stage_independently() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(2, EntityKind::Folder)]);
    assert_eq!(
        c.staged_kinds(),
        vec![EntityKind::File, EntityKind::Folder]
    );
}

#[test]
fn stage_with_no_items_clears_the_slot() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    c.stage(ClipAction::Cut, EntityKind::File, Vec::new());
    assert!(c.slot(EntityKind::File).is_none());
}

#[test]
fn latest_staged_kind_tracks_most_recent() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(2, EntityKind::Folder)]);
    assert_eq!(c.latest_staged_kind(), Some(EntityKind::Folder));
}

#[test]
fn latest_staged_kind_falls_back_after_consumption() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(2, EntityKind::Folder)]);
    let batch = c
        .plan_paste(EntityKind::Folder, target(Some(60)), &FolderTree::new())
        .unwrap();
    assert!(batch.is_some());
    assert_eq!(c.latest_staged_kind(), Some(EntityKind::File));
}

// =============================================================
// Paste: cut
// =============================================================

#[test]
fn paste_of_cut_slot_plans_moves() {
    let mut c = Clipboard::new();
    c.stage(
        ClipAction::Cut,
        EntityKind::File,
        vec![clip(1, EntityKind::File), clip(2, EntityKind::File)],
    );
    let batch = c
        .plan_paste(EntityKind::File, target(Some(60)), &FolderTree::new())
        .unwrap()
        .unwrap();
    assert_eq!(batch.origin, BatchOrigin::PasteCut { kind: EntityKind::File });
    assert_eq!(batch.len(), 2);
    assert_eq!(
        batch.requests[0],
        MutationRequest::Move {
            id: eid(1),
            kind: EntityKind::File,
            target_folder: Some(eid(60)),
            target_project: None,
        }
    );
}

#[test]
fn paste_into_project_root_has_no_target_folder() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    let batch = c
        .plan_paste(EntityKind::File, target(None), &FolderTree::new())
        .unwrap()
        .unwrap();
    assert_eq!(
        batch.requests[0],
        MutationRequest::Move {
            id: eid(1),
            kind: EntityKind::File,
            target_folder: None,
            target_project: None,
        }
    );
}

#[test]
fn cross_project_cut_carries_explicit_project_target() {
    // A root-level cross-project move must be distinguishable from a
    // same-project folder move.
    let mut c = Clipboard::new();
    c.stage(
        ClipAction::Cut,
        EntityKind::File,
        vec![clip_in_project(1, EntityKind::File, OTHER_PROJECT)],
    );
    let batch = c
        .plan_paste(EntityKind::File, target(None), &FolderTree::new())
        .unwrap()
        .unwrap();
    assert_eq!(
        batch.requests[0],
        MutationRequest::Move {
            id: eid(1),
            kind: EntityKind::File,
            target_folder: None,
            target_project: Some(eid(PROJECT)),
        }
    );
}

// =============================================================
// Paste: copy
// =============================================================

#[test]
fn paste_of_copy_slot_plans_duplicates() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Copy, EntityKind::File, vec![clip(1, EntityKind::File)]);
    let batch = c
        .plan_paste(EntityKind::File, target(Some(60)), &FolderTree::new())
        .unwrap()
        .unwrap();
    assert_eq!(batch.origin, BatchOrigin::PasteCopy { kind: EntityKind::File });
    assert_eq!(
        batch.requests[0],
        MutationRequest::Duplicate {
            id: eid(1),
            kind: EntityKind::File,
            target_folder: Some(eid(60)),
            target_project: None,
            new_name: None,
        }
    );
}

#[test]
fn folder_duplicate_gets_copy_suffix() {
    // File naming is delegated to the duplication collaborator; folders
    // get a disambiguating suffix up front.
    let mut c = Clipboard::new();
    c.stage(ClipAction::Copy, EntityKind::Folder, vec![clip(1, EntityKind::Folder)]);
    let batch = c
        .plan_paste(EntityKind::Folder, target(Some(60)), &FolderTree::new())
        .unwrap()
        .unwrap();
    let MutationRequest::Duplicate { new_name, .. } = &batch.requests[0] else {
        panic!("expected duplicate request");
    };
    assert_eq!(new_name.as_deref(), Some("item-1 (Copy)"));
}

// =============================================================
// Paste: single-use slots
// =============================================================

#[test]
fn paste_consumes_the_slot() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Copy, EntityKind::File, vec![clip(1, EntityKind::File)]);
    let first = c
        .plan_paste(EntityKind::File, target(Some(60)), &FolderTree::new())
        .unwrap();
    assert!(first.is_some());
    // Copy slots are single-use too: no repeat paste.
    let second = c
        .plan_paste(EntityKind::File, target(Some(60)), &FolderTree::new())
        .unwrap();
    assert!(second.is_none());
}

#[test]
fn paste_of_empty_slot_is_a_noop() {
    let mut c = Clipboard::new();
    let batch = c
        .plan_paste(EntityKind::File, target(Some(60)), &FolderTree::new())
        .unwrap();
    assert!(batch.is_none());
}

#[test]
fn paste_only_drains_the_requested_kind() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(2, EntityKind::Folder)]);
    c.plan_paste(EntityKind::File, target(Some(60)), &FolderTree::new())
        .unwrap();
    assert!(c.slot(EntityKind::File).is_none());
    assert!(c.slot(EntityKind::Folder).is_some());
}

// =============================================================
// Paste: circular guard
// =============================================================

#[test]
fn folder_pasted_into_itself_is_rejected_and_stays_staged() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(1, EntityKind::Folder)]);
    let err = c
        .plan_paste(EntityKind::Folder, target(Some(1)), &FolderTree::new())
        .unwrap_err();
    assert_eq!(err, PasteError::CircularPaste);
    // Validation failures leave all state unchanged.
    assert!(c.slot(EntityKind::Folder).is_some());
}

#[test]
fn folder_pasted_into_its_subtree_is_rejected() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(1, EntityKind::Folder)]);
    let mut folders = FolderTree::new();
    folders.set_parent(eid(3), Some(eid(2)));
    folders.set_parent(eid(2), Some(eid(1)));
    let err = c
        .plan_paste(EntityKind::Folder, target(Some(3)), &folders)
        .unwrap_err();
    assert_eq!(err, PasteError::CircularPaste);
}

#[test]
fn folder_pasted_at_project_root_skips_the_guard() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::Folder, vec![clip(1, EntityKind::Folder)]);
    let batch = c
        .plan_paste(EntityKind::Folder, target(None), &FolderTree::new())
        .unwrap();
    assert!(batch.is_some());
}

#[test]
fn file_slot_never_hits_the_circular_guard() {
    let mut c = Clipboard::new();
    c.stage(ClipAction::Cut, EntityKind::File, vec![clip(1, EntityKind::File)]);
    let batch = c
        .plan_paste(EntityKind::File, target(Some(1)), &FolderTree::new())
        .unwrap();
    assert!(batch.is_some());
}
