//! The mutation boundary: typed requests, the external collaborator
//! seam, and the bounded-concurrency batch runner.
//!
//! Drag drops and pastes plan their work as a [`MutationBatch`]; the host
//! hands the batch to [`run_batch`] together with its [`EntityApi`]
//! implementation (REST calls in the browser, a stub in tests). Every
//! request in a batch is attempted — there is no early abort — and each
//! outcome is recorded independently, so a slow or failing member never
//! blocks or hides the rest. The settled [`BatchReport`] goes back into
//! the engine, which applies the selection and clipboard consequences.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::MAX_IN_FLIGHT;
use crate::entity::{EntityId, EntityKind, FolderId, ProjectId};

/// Identifier tying a dispatched batch to its settled report.
pub type BatchId = Uuid;

/// Uniform failure for a single mutation call, regardless of underlying
/// cause (network, not-found, permission).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("mutation failed: {0}")]
pub struct ApiError(pub String);

/// One call to the mutation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum MutationRequest {
    /// Reparent an entity. `target_folder = None` is a project root;
    /// `target_project` is set only for cross-project moves, so the
    /// collaborator can tell a root-level cross-project move apart from
    /// a same-project folder move.
    Move {
        id: EntityId,
        kind: EntityKind,
        target_folder: Option<FolderId>,
        target_project: Option<ProjectId>,
    },
    /// Duplicate an entity into a folder. `new_name` is set for folder
    /// duplicates; file and conversation naming is delegated to the
    /// content-duplication collaborator.
    Duplicate {
        id: EntityId,
        kind: EntityKind,
        target_folder: Option<FolderId>,
        target_project: Option<ProjectId>,
        new_name: Option<String>,
    },
}

impl MutationRequest {
    /// The entity this request applies to.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        match self {
            Self::Move { id, .. } | Self::Duplicate { id, .. } => *id,
        }
    }

    /// The kind this request applies to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Move { kind, .. } | Self::Duplicate { kind, .. } => *kind,
        }
    }
}

/// Routes a settled batch back to the state that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum BatchOrigin {
    /// Drop of a drag session.
    DragMove { kind: EntityKind },
    /// Paste of a Cut slot.
    PasteCut { kind: EntityKind },
    /// Paste of a Copy slot.
    PasteCopy { kind: EntityKind },
}

impl BatchOrigin {
    /// The entity kind the originating action was scoped to.
    #[must_use]
    pub fn kind(self) -> EntityKind {
        match self {
            Self::DragMove { kind } | Self::PasteCut { kind } | Self::PasteCopy { kind } => kind,
        }
    }
}

/// A batch of mutation calls produced by one user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationBatch {
    pub id: BatchId,
    pub origin: BatchOrigin,
    pub requests: Vec<MutationRequest>,
}

impl MutationBatch {
    #[must_use]
    pub fn new(origin: BatchOrigin, requests: Vec<MutationRequest>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            requests,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Outcome of one request within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub request: MutationRequest,
    pub result: Result<(), ApiError>,
}

/// Aggregate result of a settled batch. Outcomes are in request order
/// even though calls complete out of order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: BatchId,
    pub origin: BatchOrigin,
    pub outcomes: Vec<MutationOutcome>,
}

impl BatchReport {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    #[must_use]
    pub fn is_full_success(&self) -> bool {
        self.failed() == 0
    }

    /// Ids of the requests that failed, in request order.
    pub fn failed_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.request.entity_id())
    }
}

/// The mutation collaborator: the narrow async seam to the backend.
///
/// Batch operations are expressed purely as repeated single calls; the
/// engine never assumes a native batch endpoint exists.
pub trait EntityApi {
    /// Reparent `id` into `target_folder` (`None` = project root), with
    /// `target_project` set for cross-project moves.
    fn move_entity(
        &self,
        id: EntityId,
        kind: EntityKind,
        target_folder: Option<FolderId>,
        target_project: Option<ProjectId>,
    ) -> impl Future<Output = Result<(), ApiError>>;

    /// Duplicate `id` into `target_folder`, optionally under a new name.
    fn duplicate_entity(
        &self,
        id: EntityId,
        kind: EntityKind,
        target_folder: Option<FolderId>,
        target_project: Option<ProjectId>,
        new_name: Option<&str>,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

/// Dispatch every request in the batch, at most [`MAX_IN_FLIGHT`]
/// concurrently, and collect all outcomes.
///
/// The policy is uniform across kinds and origins. Once dispatched a
/// batch is not cancellable; partial completion is expected and shows up
/// as per-item failures in the report.
pub async fn run_batch<A: EntityApi>(api: &A, batch: &MutationBatch) -> BatchReport {
    log::debug!(
        "dispatching batch {} ({:?}, {} requests)",
        batch.id,
        batch.origin,
        batch.requests.len()
    );
    let mut settled: Vec<(usize, MutationOutcome)> =
        stream::iter(batch.requests.iter().cloned().enumerate())
            .map(|(index, request)| async move {
                let result = run_one(api, &request).await;
                (index, MutationOutcome { request, result })
            })
            .buffer_unordered(MAX_IN_FLIGHT)
            .collect()
            .await;
    settled.sort_by_key(|(index, _)| *index);

    let report = BatchReport {
        batch_id: batch.id,
        origin: batch.origin,
        outcomes: settled.into_iter().map(|(_, outcome)| outcome).collect(),
    };
    if report.is_full_success() {
        log::debug!("batch {} settled: {} ok", report.batch_id, report.succeeded());
    } else {
        log::warn!(
            "batch {} settled: {} ok, {} failed",
            report.batch_id,
            report.succeeded(),
            report.failed()
        );
    }
    report
}

async fn run_one<A: EntityApi>(api: &A, request: &MutationRequest) -> Result<(), ApiError> {
    match request {
        MutationRequest::Move {
            id,
            kind,
            target_folder,
            target_project,
        } => {
            api.move_entity(*id, *kind, *target_folder, *target_project)
                .await
        }
        MutationRequest::Duplicate {
            id,
            kind,
            target_folder,
            target_project,
            new_name,
        } => {
            api.duplicate_entity(*id, *kind, *target_folder, *target_project, new_name.as_deref())
                .await
        }
    }
}
