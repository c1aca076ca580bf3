//! Given steps for coverage workflow BDD scenarios.

use super::world::{CoverageWorld, run_async};
use chrono::{Duration, Utc};
use coverly::team::{
    domain::{Actor, MemberRole},
    services::{CreateTaskRequest, RegisterMemberRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn register(world: &mut CoverageWorld, name: &str, role: MemberRole) -> Result<(), eyre::Report> {
    let request = RegisterMemberRequest::new(
        format!("gh|{}", name.to_lowercase()),
        name,
        format!("{}@example.com", name.to_lowercase()),
        role,
    );
    let member = run_async(world.members.register(request))
        .wrap_err_with(|| format!("register member '{name}'"))?;
    world.people.insert(name.to_owned(), member);
    Ok(())
}

fn create_task(
    world: &mut CoverageWorld,
    owner: &str,
    priority: &str,
    title: &str,
    days: i64,
) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let assignee = world.person(owner)?.id();
    let deadline = Utc::now().date_naive() + Duration::days(days);
    let request = CreateTaskRequest::new(title, assignee, priority, deadline, "core");
    let task = run_async(world.tasks.create_task(manager, request))
        .wrap_err_with(|| format!("create task '{title}'"))?;
    world.tasks_by_title.insert(title.to_owned(), task);
    Ok(())
}

#[given(r#"a manager and members "{first}" and "{second}""#)]
fn manager_and_members(
    world: &mut CoverageWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    register(world, "Mona", MemberRole::Manager)?;
    world.manager = Some(Actor::manager(world.person("Mona")?.id()));
    register(world, &first, MemberRole::Member)?;
    register(world, &second, MemberRole::Member)
}

#[given(
    r#""{owner}" owns a critical task "{title}" due in {days:i64} days that is in progress"#
)]
fn owns_critical_task_in_progress(
    world: &mut CoverageWorld,
    owner: String,
    title: String,
    days: i64,
) -> Result<(), eyre::Report> {
    create_task(world, &owner, "critical", &title, days)?;
    let task = world.task(&title)?;
    let actor = Actor::member(world.person(&owner)?.id());
    run_async(world.tasks.update_status(actor, task.id(), "in_progress"))
        .wrap_err("start critical task")?;
    Ok(())
}

#[given(r#""{owner}" owns a low task "{title}" due in {days:i64} days"#)]
fn owns_low_task(
    world: &mut CoverageWorld,
    owner: String,
    title: String,
    days: i64,
) -> Result<(), eyre::Report> {
    create_task(world, &owner, "low", &title, days)
}

#[given(r#"every open task of "{owner}" is marked at risk"#)]
fn every_task_marked(world: &mut CoverageWorld, owner: String) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let member = world.person(&owner)?.id();
    run_async(world.risk.mark_member_tasks_at_risk(manager, member))
        .wrap_err("bulk mark at risk")?;
    Ok(())
}
