use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::block_on;
use uuid::Uuid;

use super::*;

fn eid(n: u128) -> EntityId {
    Uuid::from_u128(n)
}

fn move_req(n: u128) -> MutationRequest {
    MutationRequest::Move {
        id: eid(n),
        kind: EntityKind::File,
        target_folder: Some(eid(50)),
        target_project: None,
    }
}

fn dup_req(n: u128, new_name: Option<&str>) -> MutationRequest {
    MutationRequest::Duplicate {
        id: eid(n),
        kind: EntityKind::Folder,
        target_folder: Some(eid(50)),
        target_project: None,
        new_name: new_name.map(str::to_owned),
    }
}

/// Future that reports `Pending` exactly once before completing, so calls
/// overlap and the in-flight cap is observable under a test executor.
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Recording stub of the mutation collaborator. Every call logs its
/// request, yields once mid-flight, and fails when the id was marked.
#[derive(Default)]
struct StubApi {
    calls: RefCell<Vec<(EntityId, EntityKind)>>,
    failing: HashSet<EntityId>,
    active: Cell<usize>,
    max_active: Cell<usize>,
}

impl StubApi {
    fn new() -> Self {
        Self::default()
    }

    fn failing(ids: &[EntityId]) -> Self {
        Self {
            failing: ids.iter().copied().collect(),
            ..Default::default()
        }
    }

    async fn call(&self, id: EntityId, kind: EntityKind) -> Result<(), ApiError> {
        self.calls.borrow_mut().push((id, kind));
        self.active.set(self.active.get() + 1);
        self.max_active.set(self.max_active.get().max(self.active.get()));
        YieldOnce::default().await;
        self.active.set(self.active.get() - 1);
        if self.failing.contains(&id) {
            Err(ApiError("stub failure".into()))
        } else {
            Ok(())
        }
    }
}

impl EntityApi for StubApi {
    async fn move_entity(
        &self,
        id: EntityId,
        kind: EntityKind,
        _target_folder: Option<FolderId>,
        _target_project: Option<ProjectId>,
    ) -> Result<(), ApiError> {
        self.call(id, kind).await
    }

    async fn duplicate_entity(
        &self,
        id: EntityId,
        kind: EntityKind,
        _target_folder: Option<FolderId>,
        _target_project: Option<ProjectId>,
        _new_name: Option<&str>,
    ) -> Result<(), ApiError> {
        self.call(id, kind).await
    }
}

// =============================================================
// Request and batch accessors
// =============================================================

#[test]
fn request_entity_id_and_kind() {
    assert_eq!(move_req(1).entity_id(), eid(1));
    assert_eq!(move_req(1).kind(), EntityKind::File);
    assert_eq!(dup_req(2, None).entity_id(), eid(2));
    assert_eq!(dup_req(2, None).kind(), EntityKind::Folder);
}

#[test]
fn origin_kind() {
    assert_eq!(
        BatchOrigin::DragMove { kind: EntityKind::File }.kind(),
        EntityKind::File
    );
    assert_eq!(
        BatchOrigin::PasteCut { kind: EntityKind::Folder }.kind(),
        EntityKind::Folder
    );
    assert_eq!(
        BatchOrigin::PasteCopy { kind: EntityKind::Conversation }.kind(),
        EntityKind::Conversation
    );
}

#[test]
fn batch_len_and_is_empty() {
    let origin = BatchOrigin::DragMove { kind: EntityKind::File };
    let empty = MutationBatch::new(origin, Vec::new());
    assert!(empty.is_empty());
    let batch = MutationBatch::new(origin, vec![move_req(1), move_req(2)]);
    assert_eq!(batch.len(), 2);
    assert!(!batch.is_empty());
}

#[test]
fn batches_get_distinct_ids() {
    let origin = BatchOrigin::DragMove { kind: EntityKind::File };
    let a = MutationBatch::new(origin, vec![move_req(1)]);
    let b = MutationBatch::new(origin, vec![move_req(1)]);
    assert_ne!(a.id, b.id);
}

#[test]
fn api_error_display() {
    let err = ApiError("connection reset".into());
    assert_eq!(err.to_string(), "mutation failed: connection reset");
}

// =============================================================
// run_batch: success
// =============================================================

#[test]
fn full_success_runs_every_request_in_order() {
    let api = StubApi::new();
    let batch = MutationBatch::new(
        BatchOrigin::DragMove { kind: EntityKind::File },
        vec![move_req(1), move_req(2), move_req(3)],
    );
    let report = block_on(run_batch(&api, &batch));
    assert!(report.is_full_success());
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.batch_id, batch.id);
    assert_eq!(report.origin, batch.origin);
    // Outcomes come back in request order regardless of completion order.
    let ids: Vec<EntityId> = report.outcomes.iter().map(|o| o.request.entity_id()).collect();
    assert_eq!(ids, vec![eid(1), eid(2), eid(3)]);
    assert_eq!(api.calls.borrow().len(), 3);
}

#[test]
fn duplicate_requests_reach_the_duplicate_call() {
    let api = StubApi::new();
    let batch = MutationBatch::new(
        BatchOrigin::PasteCopy { kind: EntityKind::Folder },
        vec![dup_req(1, Some("plans (Copy)"))],
    );
    let report = block_on(run_batch(&api, &batch));
    assert!(report.is_full_success());
    assert_eq!(api.calls.borrow()[0], (eid(1), EntityKind::Folder));
}

#[test]
fn empty_batch_settles_with_no_calls() {
    let api = StubApi::new();
    let batch = MutationBatch::new(BatchOrigin::DragMove { kind: EntityKind::File }, Vec::new());
    let report = block_on(run_batch(&api, &batch));
    assert!(report.is_full_success());
    assert!(report.outcomes.is_empty());
    assert!(api.calls.borrow().is_empty());
}

// =============================================================
// run_batch: failures
// =============================================================

#[test]
fn partial_failure_still_attempts_every_request() {
    let api = StubApi::failing(&[eid(2)]);
    let batch = MutationBatch::new(
        BatchOrigin::DragMove { kind: EntityKind::File },
        vec![move_req(1), move_req(2), move_req(3), move_req(4)],
    );
    let report = block_on(run_batch(&api, &batch));
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_full_success());
    // No early abort: all four calls went out.
    assert_eq!(api.calls.borrow().len(), 4);
    assert_eq!(report.failed_ids().collect::<Vec<_>>(), vec![eid(2)]);
    assert!(report.outcomes[1].result.is_err());
    assert!(report.outcomes[0].result.is_ok());
}

#[test]
fn total_failure_reports_every_outcome() {
    let api = StubApi::failing(&[eid(1), eid(2)]);
    let batch = MutationBatch::new(
        BatchOrigin::PasteCut { kind: EntityKind::File },
        vec![move_req(1), move_req(2)],
    );
    let report = block_on(run_batch(&api, &batch));
    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.failed(), 2);
}

// =============================================================
// run_batch: concurrency cap
// =============================================================

#[test]
fn in_flight_calls_never_exceed_the_cap() {
    let api = StubApi::new();
    let requests: Vec<MutationRequest> = (1_u128..=8).map(move_req).collect();
    let batch = MutationBatch::new(BatchOrigin::DragMove { kind: EntityKind::File }, requests);
    block_on(run_batch(&api, &batch));
    assert_eq!(api.max_active.get(), crate::consts::MAX_IN_FLIGHT);
}
