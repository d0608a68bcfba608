//! When steps for todo lifecycle BDD scenarios.

use super::world::{TodoWorld, run_async};
use chrono::Duration;
use mockable::Clock;
use rstest_bdd_macros::when;
use todo_keeper::todo::services::CreateTodoRequest;

#[when(r#"they create a todo titled "{title}" due tomorrow"#)]
fn create_due_tomorrow(world: &mut TodoWorld, title: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let tomorrow = world.clock.local().date_naive() + Duration::days(1);
    let request = CreateTodoRequest::new(title).with_due_date(tomorrow.format("%Y-%m-%d").to_string());
    let result = run_async(world.lifecycle.create(&owner, request));
    world.record(result);
    Ok(())
}

#[when(r#"they create a todo titled "{title}""#)]
fn create_titled(world: &mut TodoWorld, title: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let result = run_async(world.lifecycle.create(&owner, CreateTodoRequest::new(title)));
    world.record(result);
    Ok(())
}

#[when("they create a todo with a title of {length:usize} characters")]
fn create_with_length(world: &mut TodoWorld, length: usize) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let request = CreateTodoRequest::new("x".repeat(length));
    let result = run_async(world.lifecycle.create(&owner, request));
    world.record(result);
    Ok(())
}

#[when("they complete the todo")]
fn complete(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_todo()?.id();
    let result = run_async(world.lifecycle.complete(&owner, id));
    world.record(result);
    Ok(())
}

#[when("they complete the todo again")]
fn complete_again(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    world.clock.advance(Duration::minutes(5));
    complete(world)
}

#[when("they delete the todo")]
fn delete(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_todo()?.id();
    let result = run_async(world.lifecycle.delete(&owner, id));
    world.record(result);
    Ok(())
}

#[when("they purge the todo")]
fn purge(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_todo()?.id();
    world.last_purge = Some(run_async(world.trash.purge_one(&owner, id)));
    Ok(())
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut TodoWorld, days: i64) {
    world.clock.advance(Duration::days(days));
}

#[when("the retention sweep runs")]
fn sweep_runs(world: &mut TodoWorld) {
    world.last_report = Some(run_async(world.sweeper.run_once()));
}
