//! When steps for coverage workflow BDD scenarios.

use super::world::{CoverageWorld, run_async};
use chrono::{Duration, Utc};
use coverly::{
    availability::services::DeclareAvailabilityRequest,
    reassignment::services::{ApproveRequest, ProposalScope},
    team::domain::Actor,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{name}" is out of office tomorrow"#)]
fn out_of_office_tomorrow(world: &mut CoverageWorld, name: String) -> Result<(), eyre::Report> {
    let member = world.person(&name)?.id();
    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    let request = DeclareAvailabilityRequest::new(member, "ooo", tomorrow, tomorrow);
    run_async(world.availability.declare(Actor::member(member), request))
        .wrap_err("declare out of office")?;
    Ok(())
}

#[when(r#"the risk rules are refreshed for "{name}""#)]
fn refresh_risk(world: &mut CoverageWorld, name: String) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let member = world.person(&name)?.id();
    run_async(world.risk.refresh_member(manager, member)).wrap_err("refresh risk flags")?;
    Ok(())
}

#[when(r#"suggestions are generated for "{title}""#)]
fn generate_for(world: &mut CoverageWorld, title: String) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let task = world.task(&title)?;
    let proposal = run_async(
        world
            .workflow
            .propose(manager, ProposalScope::Tasks(vec![task.id()])),
    )
    .wrap_err("generate suggestions")?;
    world.last_proposal = Some(proposal);
    Ok(())
}

#[when("the manager approves the top suggestion")]
fn approve_top(world: &mut CoverageWorld) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let top = world
        .last_proposal
        .as_ref()
        .and_then(|proposal| proposal.suggestions.first())
        .ok_or_else(|| eyre::eyre!("no suggestion to approve"))?;
    let outcome = run_async(
        world
            .workflow
            .approve(manager, ApproveRequest::from_suggestion(top)),
    )
    .wrap_err("approve suggestion")?;
    world.last_record = Some(outcome.record);
    Ok(())
}

#[when(r#"the manager hands "{title}" to "{name}""#)]
fn hand_task(world: &mut CoverageWorld, title: String, name: String) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let task = world.task(&title)?;
    let to = world.person(&name)?.id();
    let outcome = run_async(
        world
            .workflow
            .approve(manager, ApproveRequest::manual(task.id(), to)),
    )
    .wrap_err("manual handoff")?;
    world.last_record = Some(outcome.record);
    Ok(())
}

#[when(r#"the manager submits "{title}" for "{name}""#)]
fn submit_task(world: &mut CoverageWorld, title: String, name: String) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let task = world.task(&title)?;
    let to = world.person(&name)?.id();
    let record = run_async(
        world
            .workflow
            .submit(manager, ApproveRequest::manual(task.id(), to)),
    )
    .wrap_err("submit handoff")?;
    world.last_record = Some(record);
    Ok(())
}

#[when("the manager reverts the last handoff")]
fn revert_last(world: &mut CoverageWorld) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let record = world
        .last_record
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no handoff to revert"))?
        .id();
    let reverted =
        run_async(world.workflow.revert(manager, record)).wrap_err("revert handoff")?;
    world.last_record = Some(reverted.record);
    Ok(())
}

#[when("the manager rejects the last handoff")]
fn reject_last(world: &mut CoverageWorld) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let record = world
        .last_record
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no handoff to reject"))?
        .id();
    let rejected = run_async(world.workflow.reject(manager, record, Some("Ada is back")))
        .wrap_err("reject handoff")?;
    world.last_record = Some(rejected);
    Ok(())
}
