//! Unit tests for the in-memory reassignment repository.

use crate::reassignment::{
    adapters::memory::InMemoryReassignmentRepository,
    domain::{
        BatchFailure, CoverageBatch, HandoffOrigin, ReassignmentParams, ReassignmentRecord,
    },
    ports::{ReassignmentRepository, ReassignmentRepositoryError},
};
use crate::team::domain::{MemberId, TaskId};
use crate::test_support::FixedClock;
use chrono::Duration;
use mockable::Clock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryReassignmentRepository {
    InMemoryReassignmentRepository::new()
}

fn record(clock: &FixedClock, task_id: TaskId) -> ReassignmentRecord {
    ReassignmentRecord::new_pending(
        ReassignmentParams {
            task_id,
            from_member: MemberId::new(),
            to_member: MemberId::new(),
            initiated_by: MemberId::new(),
            handoff_doc: String::new(),
            handoff_origin: HandoffOrigin::Supplied,
            reasoning: String::new(),
        },
        clock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_records_are_rejected(repository: InMemoryReassignmentRepository) {
    let clock = FixedClock::on(2026, 3, 2);
    let stored = record(&clock, TaskId::new());
    repository.store(&stored).await.expect("first store");

    let result = repository.store(&stored).await;

    assert!(matches!(
        result,
        Err(ReassignmentRepositoryError::DuplicateRecord(id)) if id == stored.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_record_fails(repository: InMemoryReassignmentRepository) {
    let clock = FixedClock::on(2026, 3, 2);
    let missing = record(&clock, TaskId::new());

    let result = repository.update(&missing).await;

    assert!(matches!(result, Err(ReassignmentRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_is_listed_oldest_first(repository: InMemoryReassignmentRepository) {
    let clock = FixedClock::on(2026, 3, 2);
    let task_id = TaskId::new();
    let first = record(&clock, task_id);
    clock.advance(Duration::minutes(5));
    let second = record(&clock, task_id);
    let unrelated = record(&clock, TaskId::new());
    for each in [&first, &second, &unrelated] {
        repository.store(each).await.expect("store");
    }

    let history = repository.list_for_task(task_id).await.expect("list");

    let ids: Vec<_> = history.iter().map(ReassignmentRecord::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batches_round_trip_and_update(repository: InMemoryReassignmentRepository) {
    let clock = FixedClock::on(2026, 3, 2);
    let failure = BatchFailure {
        task_id: TaskId::new(),
        reason: "task not found".to_owned(),
    };
    let mut batch = CoverageBatch::new(MemberId::new(), Vec::new(), vec![failure], &clock);
    repository.store_batch(&batch).await.expect("store batch");
    assert!(matches!(
        repository.store_batch(&batch).await,
        Err(ReassignmentRepositoryError::DuplicateBatch(_))
    ));

    batch.mark_reverted(&clock);
    repository.update_batch(&batch).await.expect("update batch");

    let found = repository
        .find_batch(batch.id())
        .await
        .expect("find batch")
        .expect("batch exists");
    assert_eq!(found.reverted_at(), Some(clock.utc()));
}
