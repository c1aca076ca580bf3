//! Unit tests for the risk classifier rules.

use crate::availability::domain::{AvailabilityEntry, AvailabilityKind, DateRange};
use crate::policy::CoveragePolicy;
use crate::team::domain::{MemberId, Task, TaskParams, TaskPriority, TaskStatus};
use crate::test_support::{FixedClock, days_from};
use crate::workload::domain::{RiskReason, WorkloadScore, assess};
use mockable::Clock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock::on(2026, 3, 2)
}

fn task(clock: &FixedClock, status: TaskStatus, due_in_days: i64) -> Task {
    let params = TaskParams::new(
        "Work",
        MemberId::new(),
        TaskPriority::Medium,
        days_from(clock, due_in_days),
        "core",
    );
    let mut created = Task::new(params, MemberId::new(), clock).expect("valid task");
    created.set_status(status, clock);
    created
}

fn entry(clock: &FixedClock, kind: AvailabilityKind, from: i64, to: i64) -> AvailabilityEntry {
    let range = DateRange::new(days_from(clock, from), days_from(clock, to)).expect("valid range");
    AvailabilityEntry::new(MemberId::new(), kind, range, clock)
}

fn reasons(
    clock: &FixedClock,
    subject: &Task,
    score: u8,
    entries: &[AvailabilityEntry],
) -> Vec<RiskReason> {
    assess(
        subject,
        WorkloadScore::from_value(score),
        entries,
        &CoveragePolicy::default(),
        clock.utc(),
    )
    .reasons
}

#[rstest]
#[case(0)]
#[case(95)]
fn blocked_is_always_at_risk(clock: FixedClock, #[case] score: u8) {
    let subject = task(&clock, TaskStatus::Blocked, 60);
    assert_eq!(reasons(&clock, &subject, score, &[]), vec![RiskReason::Blocked]);
}

#[rstest]
#[case(2, true)]
#[case(3, true)]
#[case(4, false)]
#[case(10, false)]
fn todo_near_deadline(clock: FixedClock, #[case] due_in_days: i64, #[case] at_risk: bool) {
    let subject = task(&clock, TaskStatus::Todo, due_in_days);
    let found = reasons(&clock, &subject, 0, &[]);
    assert_eq!(found.contains(&RiskReason::TodoNearDeadline), at_risk);
}

#[rstest]
fn in_progress_near_deadline_is_fine(clock: FixedClock) {
    let subject = task(&clock, TaskStatus::InProgress, 1);
    assert!(reasons(&clock, &subject, 50, &[]).is_empty());
}

#[rstest]
#[case(81, 7, true)]
#[case(81, 8, false)]
#[case(80, 1, false)]
fn overload_needs_gate_and_horizon(
    clock: FixedClock,
    #[case] score: u8,
    #[case] due_in_days: i64,
    #[case] at_risk: bool,
) {
    let subject = task(&clock, TaskStatus::InProgress, due_in_days);
    let found = reasons(&clock, &subject, score, &[]);
    assert_eq!(found.contains(&RiskReason::Overloaded), at_risk);
}

#[rstest]
fn strict_policy_widens_overload_horizon(clock: FixedClock) {
    let subject = task(&clock, TaskStatus::InProgress, 12);
    let assessment = assess(
        &subject,
        WorkloadScore::from_value(90),
        &[],
        &CoveragePolicy::strict(),
        clock.utc(),
    );
    assert_eq!(assessment.reasons, vec![RiskReason::Overloaded]);
}

#[rstest]
#[case(AvailabilityKind::Ooo, 1, 1, true)]
#[case(AvailabilityKind::Ooo, 0, 5, true)]
#[case(AvailabilityKind::Ooo, 2, 5, false)]
#[case(AvailabilityKind::AtCapacity, 1, 1, false)]
#[case(AvailabilityKind::Partial, 1, 1, false)]
fn out_of_office_on_deadline(
    clock: FixedClock,
    #[case] kind: AvailabilityKind,
    #[case] from: i64,
    #[case] to: i64,
    #[case] at_risk: bool,
) {
    let subject = task(&clock, TaskStatus::InProgress, 1);
    let entries = [entry(&clock, kind, from, to)];
    let found = reasons(&clock, &subject, 0, &entries);
    assert_eq!(found.contains(&RiskReason::OutOfOffice), at_risk);
}

#[rstest]
fn all_reasons_are_reported(clock: FixedClock) {
    let subject = task(&clock, TaskStatus::Todo, 1);
    let entries = [entry(&clock, AvailabilityKind::Ooo, 1, 1)];
    assert_eq!(
        reasons(&clock, &subject, 99, &entries),
        vec![
            RiskReason::Overloaded,
            RiskReason::OutOfOffice,
            RiskReason::TodoNearDeadline
        ]
    );
}

#[rstest]
fn done_tasks_are_never_at_risk(clock: FixedClock) {
    let subject = task(&clock, TaskStatus::Done, 0);
    let entries = [entry(&clock, AvailabilityKind::Ooo, 0, 0)];
    let assessment = assess(
        &subject,
        WorkloadScore::from_value(100),
        &entries,
        &CoveragePolicy::default(),
        clock.utc(),
    );
    assert!(!assessment.is_at_risk());
    assert_eq!(assessment.task_id, subject.id());
}
