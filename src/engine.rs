//! The explorer core: one synchronously-owned state object that routes
//! pointer, keyboard, drag, and menu events and applies batch settlement
//! rules.
//!
//! Everything here is synchronous and completes within the host's event
//! handler. Asynchronous mutation runs in [`crate::dispatch`]; the host
//! feeds the settled [`BatchReport`] back through
//! [`Explorer::on_batch_settled`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use crate::clipboard::{ClipAction, ClipItem, Clipboard};
use crate::consts::DRAG_END_SUPPRESS_MS;
use crate::dispatch::{BatchOrigin, BatchReport, MutationBatch, MutationRequest};
use crate::drag::{DragSession, DragSubject, DropVerdict};
use crate::entity::{Container, EntityId, EntityKind, FolderId, FolderTree, Item};
use crate::geometry::{Point, Rect};
use crate::input::{Key, Modifiers};
use crate::marquee::Marquee;
use crate::menu::{self, MenuModel};
use crate::notice::Notice;
use crate::selection::SelectionSet;

/// Work the host must perform after an engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Selection, marquee, or drag state changed; repaint highlights and
    /// overlays.
    Render,
    /// Hand this batch to [`crate::dispatch::run_batch`], then feed the
    /// settled report back through [`Explorer::on_batch_settled`].
    Dispatch(MutationBatch),
    /// Show this notice to the user.
    Notify(Notice),
}

/// The selection, drag-transfer, and clipboard engine for one container
/// view.
#[derive(Debug, Default)]
pub struct Explorer {
    container: Option<Container>,
    items: Vec<Item>,
    folders: FolderTree,
    selection: SelectionSet,
    marquee: Marquee,
    drag: Option<DragSession>,
    clipboard: Clipboard,
    last_drag_end_ms: Option<f64>,
}

impl Explorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Provider inputs ---

    /// Navigate to a container. Selection does not survive navigation;
    /// a marquee or drag in progress is abandoned. The clipboard does
    /// survive, so a cut can be pasted after navigating elsewhere.
    pub fn set_container(&mut self, container: Container) {
        if self.container == Some(container) {
            return;
        }
        self.container = Some(container);
        self.items.clear();
        self.selection.clear();
        self.marquee.release();
        self.drag = None;
    }

    /// Replace the visible item list with a fresh provider snapshot.
    pub fn load_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// Replace folder parent links with a fresh provider snapshot.
    pub fn load_folder_parents(
        &mut self,
        parents: impl IntoIterator<Item = (FolderId, Option<FolderId>)>,
    ) {
        self.folders.load(parents);
    }

    // --- Render queries ---

    #[must_use]
    pub fn container(&self) -> Option<Container> {
        self.container
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The rubber-band overlay rectangle, if one is active.
    #[must_use]
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.marquee.rect()
    }

    /// The in-flight drag, for ghost/overlay rendering.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    // --- Clicks ---

    /// Item click. Ignored inside the post-drag suppression window: a
    /// drop gesture produces a synthetic trailing click that must not
    /// collapse the selection the user just dragged.
    pub fn on_item_click(
        &mut self,
        kind: EntityKind,
        id: EntityId,
        modifiers: Modifiers,
        now_ms: f64,
    ) -> Vec<Action> {
        if self.suppressed(now_ms) {
            return Vec::new();
        }
        if self.selection.click(kind, id, modifiers) {
            vec![Action::Render]
        } else {
            Vec::new()
        }
    }

    // --- Rubber band ---

    /// Pointer-down in the container. Over empty space the rubber band
    /// starts immediately; over an item it is deferred until the pointer
    /// travels past the start threshold.
    pub fn on_pointer_down(&mut self, at: Point, modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        if self.suppressed(now_ms) {
            return Vec::new();
        }
        let additive = modifiers.additive();
        if self.items.iter().any(|item| item.rect.contains(at)) {
            self.marquee.press_item(at, additive);
            Vec::new()
        } else {
            self.marquee.press_empty(at, additive, &mut self.selection);
            vec![Action::Render]
        }
    }

    pub fn on_pointer_move(&mut self, to: Point) -> Vec<Action> {
        let changed = self.marquee.pointer_move(to, &self.items, &mut self.selection);
        if changed || self.marquee.is_active() {
            vec![Action::Render]
        } else {
            Vec::new()
        }
    }

    /// Pointer-up in the container, or the window-level mouse-up the host
    /// relays when the pointer left mid-gesture. The last computed
    /// selection stands; there is no further commit step.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.marquee.release() {
            vec![Action::Render]
        } else {
            Vec::new()
        }
    }

    // --- Drag transfer ---

    /// Drag start from the host's drag layer. The session snapshots the
    /// kind-scoped selection (or just the subject) and freezes it; a
    /// deferred rubber-band press for the same pointer is taken over.
    pub fn on_drag_start(&mut self, subject: DragSubject) -> Vec<Action> {
        self.marquee.release();
        let session = DragSession::begin(subject, &self.selection);
        log::debug!(
            "drag {} started: {:?}, {} item(s)",
            session.id,
            subject.kind(),
            session.dragged_ids.len()
        );
        self.drag = Some(session);
        vec![Action::Render]
    }

    /// Drag over. `target` is the folder under the pointer, or `None`
    /// when the pointer is not over a folder container.
    pub fn on_drag_over(&mut self, target: Option<FolderId>) -> Vec<Action> {
        match &mut self.drag {
            Some(session) if session.over_target != target => {
                session.over_target = target;
                vec![Action::Render]
            }
            _ => Vec::new(),
        }
    }

    /// Drop. No target cancels with the selection preserved; a circular
    /// folder drop is rejected with a notice; a drop where every item
    /// already has the target as parent is success with no mutation and
    /// no notice; anything else dispatches one move per dragged id.
    pub fn on_drop(&mut self, target: Option<FolderId>, now_ms: f64) -> Vec<Action> {
        let Some(session) = self.drag.take() else {
            return Vec::new();
        };
        self.last_drag_end_ms = Some(now_ms);
        let kind = session.subject.kind();
        let items = &self.items;
        let verdict = session.validate_drop(
            target,
            |id| {
                items
                    .iter()
                    .find(|item| item.entity.kind == kind && item.entity.id == id)
                    .and_then(|item| item.entity.parent_folder_id)
            },
            &self.folders,
        );
        match verdict {
            DropVerdict::Cancelled | DropVerdict::AlreadyThere => vec![Action::Render],
            DropVerdict::Rejected(err) => {
                log::debug!("drag {} rejected: {err}", session.id);
                vec![Action::Render, Action::Notify(Notice::DropRejected(err))]
            }
            DropVerdict::Move { target, ids } => {
                let requests = ids
                    .into_iter()
                    .map(|id| MutationRequest::Move {
                        id,
                        kind,
                        target_folder: Some(target),
                        target_project: None,
                    })
                    .collect();
                let batch = MutationBatch::new(BatchOrigin::DragMove { kind }, requests);
                vec![Action::Render, Action::Dispatch(batch)]
            }
        }
    }

    // --- Context menus ---

    /// Right-click on an item. The host repaints after this call: the
    /// selection may have collapsed to the clicked item.
    pub fn on_item_context_menu(&mut self, kind: EntityKind, id: EntityId) -> MenuModel {
        let entity = self
            .items
            .iter()
            .find(|item| item.entity.kind == kind && item.entity.id == id)
            .map(|item| item.entity);
        match entity {
            Some(entity) => menu::resolve_item_menu(entity, &mut self.selection, &self.clipboard),
            None => menu::resolve_container_menu(&mut self.selection, &self.clipboard),
        }
    }

    /// Right-click on empty container space. Clears the selection.
    pub fn on_container_context_menu(&mut self) -> MenuModel {
        menu::resolve_container_menu(&mut self.selection, &self.clipboard)
    }

    // --- Clipboard ---

    /// Stage the current selection as a Cut, one slot per selected kind.
    pub fn cut_selection(&mut self) -> Vec<Action> {
        self.stage_selection(ClipAction::Cut)
    }

    /// Stage the current selection as a Copy, one slot per selected kind.
    pub fn copy_selection(&mut self) -> Vec<Action> {
        self.stage_selection(ClipAction::Copy)
    }

    fn stage_selection(&mut self, action: ClipAction) -> Vec<Action> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        for kind in EntityKind::ALL {
            if self.selection.ids(kind).is_empty() {
                continue;
            }
            let staged: Vec<ClipItem> = self
                .items
                .iter()
                .filter(|item| {
                    item.entity.kind == kind && self.selection.contains(kind, item.entity.id)
                })
                .map(|item| ClipItem {
                    entity: item.entity,
                    name: item.name.clone(),
                })
                .collect();
            self.clipboard.stage(action, kind, staged);
        }
        vec![Action::Render]
    }

    /// Paste the staged slot of `kind` into `target` — the current
    /// container for menu and keyboard pastes, or another folder for the
    /// "paste into this folder" affordance. A rejected paste leaves the
    /// slot staged; a planned paste consumes it.
    pub fn paste(&mut self, kind: EntityKind, target: Container) -> Vec<Action> {
        match self.clipboard.plan_paste(kind, target, &self.folders) {
            Err(err) => {
                log::debug!("paste rejected: {err}");
                vec![Action::Notify(Notice::PasteRejected(err))]
            }
            Ok(None) => Vec::new(),
            Ok(Some(batch)) => vec![Action::Render, Action::Dispatch(batch)],
        }
    }

    // --- Keyboard ---

    /// Keyboard shortcuts: Escape abandons the marquee or drag and clears
    /// the selection; ctrl/cmd+A selects all visible items; ctrl/cmd+X
    /// and ctrl/cmd+C stage the selection; ctrl/cmd+V pastes the most
    /// recently staged kind into the current container.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => {
                let mut changed = self.marquee.release();
                changed |= self.drag.take().is_some();
                if !self.selection.is_empty() {
                    self.selection.clear();
                    changed = true;
                }
                if changed { vec![Action::Render] } else { Vec::new() }
            }
            "a" | "A" if modifiers.additive() => {
                let mut next = SelectionSet::new();
                for item in &self.items {
                    next.insert(item.entity.kind, item.entity.id);
                }
                if next == self.selection {
                    Vec::new()
                } else {
                    self.selection.replace(next);
                    vec![Action::Render]
                }
            }
            "x" | "X" if modifiers.additive() => self.cut_selection(),
            "c" | "C" if modifiers.additive() => self.copy_selection(),
            "v" | "V" if modifiers.additive() => {
                let Some(container) = self.container else {
                    return Vec::new();
                };
                match self.clipboard.latest_staged_kind() {
                    Some(kind) => self.paste(kind, container),
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    // --- Settlement ---

    /// Fold a settled batch back into the interaction state. Full success
    /// clears the selection and emits the count-aware notice; any failure
    /// keeps exactly the failed items selected so the user can retry, and
    /// emits the aggregate notice once for the whole batch.
    pub fn on_batch_settled(&mut self, report: &BatchReport) -> Vec<Action> {
        let kind = report.origin.kind();
        if report.is_full_success() {
            self.selection.clear();
            let count = report.outcomes.len();
            let notice = match report.origin {
                BatchOrigin::DragMove { .. } | BatchOrigin::PasteCut { .. } => {
                    Notice::Moved { kind, count }
                }
                BatchOrigin::PasteCopy { .. } => Notice::Copied { kind, count },
            };
            vec![Action::Render, Action::Notify(notice)]
        } else {
            let failed: HashSet<EntityId> = report.failed_ids().collect();
            let mut next = SelectionSet::new();
            for id in &failed {
                next.insert(kind, *id);
            }
            self.selection.replace(next);
            vec![
                Action::Render,
                Action::Notify(Notice::BatchFailed {
                    succeeded: report.succeeded(),
                    failed: report.failed(),
                }),
            ]
        }
    }

    fn suppressed(&self, now_ms: f64) -> bool {
        self.last_drag_end_ms
            .is_some_and(|end| now_ms - end < DRAG_END_SUPPRESS_MS)
    }
}
