//! Completion review and comment context through the service layer.

use super::helpers::{Stores, stores};
use coverly::team::{
    domain::{Actor, CompletionStatus, MemberRole, TaskStatus, TeamDomainError},
    services::{CreateTaskRequest, TaskServiceError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn rejected_completion_returns_to_the_assignee(stores: Stores) -> Result<(), eyre::Report> {
    let boss = stores.manager().await?;
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    let tasks = stores.task_service();
    let task = tasks
        .create_task(
            boss,
            CreateTaskRequest::new(
                "Write runbook",
                ada.id(),
                "medium",
                stores.clock.days_from_today(4),
                "ops",
            ),
        )
        .await?;
    let submitted = tasks.submit_completion(Actor::member(ada.id()), task.id()).await?;
    assert_eq!(submitted.status(), TaskStatus::Done);
    assert_eq!(submitted.completion_status(), CompletionStatus::PendingReview);

    let too_short = tasks.reject_completion(boss, task.id(), "  redo  ").await;
    assert!(matches!(
        too_short,
        Err(TaskServiceError::Domain(TeamDomainError::FeedbackTooShort { minimum: 10, actual: 4 }))
    ));

    let returned = tasks
        .reject_completion(boss, task.id(), "Add the rollback steps")
        .await?;

    assert_eq!(returned.status(), TaskStatus::InProgress);
    assert_eq!(returned.completion_status(), CompletionStatus::ChangesRequested);
    assert_eq!(
        returned.completion_feedback().map(|f| f.as_str()),
        Some("Add the rollback steps")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn recent_comments_are_newest_first_and_capped(stores: Stores) -> Result<(), eyre::Report> {
    let boss = stores.manager().await?;
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    let tasks = stores.task_service();
    let task = tasks
        .create_task(
            boss,
            CreateTaskRequest::new(
                "Write runbook",
                ada.id(),
                "low",
                stores.clock.days_from_today(10),
                "ops",
            ),
        )
        .await?;
    for index in 1..=7 {
        tasks
            .add_comment(Actor::member(ada.id()), task.id(), &format!("update {index}"))
            .await?;
        stores.clock.advance(chrono::Duration::minutes(1));
    }

    let recent = tasks.recent_comments(task.id()).await?;

    let bodies: Vec<&str> = recent.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(
        bodies,
        vec!["update 7", "update 6", "update 5", "update 4", "update 3"]
    );
    Ok(())
}
