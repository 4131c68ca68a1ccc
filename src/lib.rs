//! Selection, drag-transfer, and clipboard engine for the workspace item
//! browser.
//!
//! This crate is the interaction layer beneath the container view of a
//! project workspace: the rectangle a user drags over rows of files,
//! folders, and conversations, the multi-select click rules, the drag
//! session that moves a group into a folder, and the staged cut/copy
//! slots a paste drains. The host UI wires DOM events into
//! [`engine::Explorer`], draws from its queries, runs the
//! [`engine::Action`]s it returns, and hands mutation batches to
//! [`dispatch::run_batch`] together with its REST-backed
//! [`dispatch::EntityApi`] implementation.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Explorer`] state and event routing |
//! | [`selection`] | Kind-partitioned selection set and click rules |
//! | [`marquee`] | Rubber-band rectangle state machine |
//! | [`drag`] | Drag sessions and drop validation |
//! | [`clipboard`] | Per-kind single-use cut/copy slots and paste planning |
//! | [`menu`] | Context-menu scope resolution |
//! | [`dispatch`] | Mutation requests and the bounded-concurrency runner |
//! | [`notice`] | Count-aware user-visible outcome text |
//! | [`entity`] | Entity kinds, references, items, folder parent links |
//! | [`geometry`] | Points, rectangles, and the AABB intersection test |
//! | [`input`] | Modifier keys and keyboard keys |
//! | [`consts`] | Shared numeric constants (thresholds, concurrency cap) |

pub mod clipboard;
pub mod consts;
pub mod dispatch;
pub mod drag;
pub mod engine;
pub mod entity;
pub mod geometry;
pub mod input;
pub mod marquee;
pub mod menu;
pub mod notice;
pub mod selection;

pub use clipboard::{ClipAction, ClipItem, Clipboard, ClipboardSlot, PasteError};
pub use dispatch::{
    ApiError, BatchId, BatchOrigin, BatchReport, EntityApi, MutationBatch, MutationOutcome,
    MutationRequest, run_batch,
};
pub use drag::{DragSession, DragSubject, DropError, DropVerdict};
pub use engine::{Action, Explorer};
pub use entity::{Container, EntityId, EntityKind, EntityRef, FolderId, FolderTree, Item, ProjectId};
pub use geometry::{Point, Rect};
pub use input::{Key, Modifiers};
pub use marquee::Marquee;
pub use menu::{KindCounts, MenuModel, MenuScope};
pub use notice::Notice;
pub use selection::SelectionSet;
