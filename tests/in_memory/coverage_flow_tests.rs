//! End-to-end coverage flows across every service.

use super::helpers::{Stores, stores};
use coverly::{
    availability::services::DeclareAvailabilityRequest,
    reassignment::{
        domain::ReassignmentStatus,
        services::{ApproveRequest, ProposalScope},
    },
    team::{
        domain::{Actor, MemberRole},
        services::CreateTaskRequest,
    },
    workload::domain::{RiskReason, WorkloadLevel},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn out_of_office_owner_hands_critical_task_to_a_colleague(
    stores: Stores,
) -> Result<(), eyre::Report> {
    let boss = stores.manager().await?;
    let ada = stores.register("Ada", MemberRole::Member, &["payments"]).await?;
    let ben = stores.register("Ben", MemberRole::Member, &["payments"]).await?;
    let tasks = stores.task_service();
    let critical = tasks
        .create_task(
            boss,
            CreateTaskRequest::new(
                "Settle ledger",
                ada.id(),
                "critical",
                stores.clock.days_from_today(1),
                "payments",
            )
            .with_skill_required("payments"),
        )
        .await?;
    tasks
        .update_status(Actor::member(ada.id()), critical.id(), "in_progress")
        .await?;
    let low = tasks
        .create_task(
            boss,
            CreateTaskRequest::new(
                "Tidy docs",
                ada.id(),
                "low",
                stores.clock.days_from_today(30),
                "docs",
            ),
        )
        .await?;

    let workload = stores.workload_service().member_workload(ada.id()).await?;
    assert_eq!(workload.score.value(), 63);
    assert_eq!(workload.level, WorkloadLevel::Moderate);
    assert!(!workload.score.is_overloaded());

    let risk = stores.risk_service();
    let before = risk.refresh_member(boss, ada.id()).await?;
    assert!(before.newly_flagged.is_empty());

    let tomorrow = stores.clock.days_from_today(1);
    stores
        .availability_service()
        .declare(
            Actor::member(ada.id()),
            DeclareAvailabilityRequest::new(ada.id(), "ooo", tomorrow, tomorrow),
        )
        .await?;
    let after = risk.refresh_member(boss, ada.id()).await?;
    assert_eq!(after.newly_flagged, vec![critical.id()]);
    let assessment = risk.assess_task(critical.id()).await?;
    assert!(assessment.reasons.contains(&RiskReason::OutOfOffice));
    assert!(!risk.assess_task(low.id()).await?.is_at_risk());

    let workflow = stores.workflow();
    let proposal = workflow
        .propose(boss, ProposalScope::Tasks(vec![critical.id()]))
        .await?;
    let top = proposal
        .for_task(critical.id())
        .ok_or_else(|| eyre::eyre!("expected a suggestion for the critical task"))?;
    eyre::ensure!(top.to_member == ben.id(), "expected Ben, got {}", top.to_member);

    let outcome = workflow
        .approve(boss, ApproveRequest::from_suggestion(top))
        .await?;

    let stored = tasks
        .find_task(critical.id())
        .await?
        .ok_or_else(|| eyre::eyre!("critical task vanished"))?;
    assert_eq!(stored.assignee(), ben.id());
    assert!(!stored.is_at_risk());
    assert_eq!(stored.handoff_doc(), Some(outcome.record.handoff_doc()));
    let history = workflow.history(critical.id()).await?;
    let approved: Vec<_> = history
        .iter()
        .filter(|record| record.status() == ReassignmentStatus::Approved)
        .collect();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved.first().map(|r| r.to_member()), Some(ben.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn rejected_proposal_leaves_the_task_untouched(stores: Stores) -> Result<(), eyre::Report> {
    let boss = stores.manager().await?;
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    let ben = stores.register("Ben", MemberRole::Member, &[]).await?;
    let task = stores
        .task_service()
        .create_task(
            boss,
            CreateTaskRequest::new(
                "Patch router",
                ada.id(),
                "high",
                stores.clock.days_from_today(2),
                "edge",
            ),
        )
        .await?;
    stores
        .risk_service()
        .mark_member_tasks_at_risk(boss, ada.id())
        .await?;
    let before = stores.task_service().find_task(task.id()).await?;

    let workflow = stores.workflow();
    let pending = workflow
        .submit(boss, ApproveRequest::manual(task.id(), ben.id()))
        .await?;
    workflow.reject(boss, pending.id(), None).await?;

    let after = stores.task_service().find_task(task.id()).await?;
    assert_eq!(before, after);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn approve_all_then_revert_restores_every_task(stores: Stores) -> Result<(), eyre::Report> {
    let boss = stores.manager().await?;
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    stores.register("Ben", MemberRole::Member, &[]).await?;
    let tasks = stores.task_service();
    let mut created = Vec::new();
    for title in ["Rotate keys", "Renew certs", "Audit logs"] {
        let task = tasks
            .create_task(
                boss,
                CreateTaskRequest::new(
                    title,
                    ada.id(),
                    "medium",
                    stores.clock.days_from_today(5),
                    "ops",
                ),
            )
            .await?;
        created.push(task);
        stores.clock.advance(chrono::Duration::seconds(1));
    }
    stores
        .risk_service()
        .mark_member_tasks_at_risk(boss, ada.id())
        .await?;

    let workflow = stores.workflow();
    let proposal = workflow.propose(boss, ProposalScope::AllAtRisk).await?;
    assert_eq!(proposal.suggestions.len(), created.len());
    let batch = workflow.approve_all(boss, &proposal.suggestions).await?;
    assert_eq!(batch.records().len(), created.len());
    assert!(stores.risk_service().at_risk_tasks().await?.is_empty());

    let report = workflow.revert_batch(boss, batch.id()).await?;

    assert_eq!(report.reverted_count(), created.len());
    for task in &created {
        let restored = tasks
            .find_task(task.id())
            .await?
            .ok_or_else(|| eyre::eyre!("task vanished"))?;
        assert_eq!(restored.assignee(), ada.id());
        assert!(restored.is_at_risk());
    }
    Ok(())
}
