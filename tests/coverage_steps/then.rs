//! Then steps for coverage workflow BDD scenarios.

use super::world::{CoverageWorld, run_async};
use coverly::reassignment::domain::ReassignmentStatus;
use rstest_bdd_macros::then;

#[then(r#"the workload score of "{name}" is {expected:u8}"#)]
fn workload_score_is(world: &CoverageWorld, name: String, expected: u8) -> Result<(), eyre::Report> {
    let member = world.person(&name)?.id();
    let workload = run_async(world.workload.member_workload(member))
        .map_err(|err| eyre::eyre!("workload lookup failed: {err}"))?;
    eyre::ensure!(
        workload.score.value() == expected,
        "expected score {expected} for '{name}', got {}",
        workload.score.value()
    );
    Ok(())
}

#[then(r#"the task "{title}" is at risk"#)]
fn task_is_at_risk(world: &CoverageWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task(&title)?;
    eyre::ensure!(task.is_at_risk(), "expected '{title}' to be at risk");
    Ok(())
}

#[then(r#"the task "{title}" is not at risk"#)]
fn task_is_not_at_risk(world: &CoverageWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task(&title)?;
    eyre::ensure!(!task.is_at_risk(), "expected '{title}' not to be at risk");
    Ok(())
}

#[then(r#"the task "{title}" is assigned to "{name}""#)]
fn task_assigned_to(world: &CoverageWorld, title: String, name: String) -> Result<(), eyre::Report> {
    let task = world.task(&title)?;
    let expected = world.person(&name)?.id();
    eyre::ensure!(
        task.assignee() == expected,
        "expected '{title}' to be assigned to '{name}', got {}",
        task.assignee()
    );
    Ok(())
}

#[then(r#"the task "{title}" has {count:usize} approved reassignment records"#)]
fn approved_record_count(
    world: &CoverageWorld,
    title: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let task = world.task(&title)?;
    let history = run_async(world.workflow.history(task.id()))
        .map_err(|err| eyre::eyre!("history lookup failed: {err}"))?;
    let approved = history
        .iter()
        .filter(|record| record.status() == ReassignmentStatus::Approved)
        .count();
    eyre::ensure!(
        approved == count,
        "expected {count} approved records for '{title}', found {approved}"
    );
    Ok(())
}
