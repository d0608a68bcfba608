//! Conditional transitions against `PostgreSQL`.

use super::helpers::{PgEngine, owner};
use chrono::Duration;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use todo_keeper::todo::{
    domain::TodoStatus,
    ports::{TodoRepository, TodoRepositoryError},
    services::{CreateTodoRequest, ErrorKind, TodoServiceError, UpdateTodoRequest},
};

#[rstest]
fn completing_twice_conflicts_and_keeps_the_first_completion(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        let created = engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("Buy milk"))
            .await?;
        let completed = engine.lifecycle.complete(&u1, created.id()).await?;
        eyre::ensure!(completed.status() == TodoStatus::Completed, "todo should complete");
        let first_completion = completed.completed_at();
        eyre::ensure!(first_completion.is_some(), "completion time is set");

        engine.clock.advance(Duration::hours(1));
        let again = engine.lifecycle.complete(&u1, created.id()).await;
        eyre::ensure!(
            matches!(again, Err(TodoServiceError::Conflict(id)) if id == created.id()),
            "second completion should conflict, got {again:?}"
        );

        let stored = engine.lifecycle.get(&u1, created.id()).await?;
        eyre::ensure!(
            stored.completed_at() == first_completion,
            "stored completion time changed to {:?}",
            stored.completed_at()
        );
        Ok(())
    })
}

#[rstest]
fn restoring_as_completed_keeps_the_original_completion_time(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        let created = engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("File taxes"))
            .await?;
        let completed = engine.lifecycle.complete(&u1, created.id()).await?;
        engine.clock.advance(Duration::days(2));
        engine.lifecycle.delete(&u1, created.id()).await?;
        engine.clock.advance(Duration::days(1));

        let restored = engine
            .lifecycle
            .restore(&u1, created.id(), Some(TodoStatus::Completed))
            .await?;
        eyre::ensure!(restored.status() == TodoStatus::Completed, "restored as completed");
        eyre::ensure!(restored.deleted_at().is_none(), "deletion time is cleared");
        eyre::ensure!(
            restored.completed_at() == completed.completed_at(),
            "completion time moved from {:?} to {:?}",
            completed.completed_at(),
            restored.completed_at()
        );
        Ok(())
    })
}

#[rstest]
fn restoring_a_never_completed_todo_as_completed_stamps_now(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        let created = engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("Water plants"))
            .await?;
        engine.lifecycle.delete(&u1, created.id()).await?;
        engine.clock.advance(Duration::minutes(10));

        let restored = engine
            .lifecycle
            .restore(&u1, created.id(), Some(TodoStatus::Completed))
            .await?;
        eyre::ensure!(
            restored.completed_at() == Some(created.created_at() + Duration::minutes(10)),
            "completion time should be the restore instant, got {:?}",
            restored.completed_at()
        );

        let again = engine.lifecycle.restore(&u1, created.id(), None).await;
        eyre::ensure!(
            matches!(again, Err(TodoServiceError::NotFound(_))),
            "restoring a live todo should be not found, got {again:?}"
        );
        Ok(())
    })
}

#[rstest]
fn other_owners_cannot_reach_a_todo(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let (u1, u2) = (owner("U1")?, owner("U2")?);

    engine.block_on(async {
        let created = engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("Private"))
            .await?;

        let read = engine.lifecycle.get(&u2, created.id()).await;
        eyre::ensure!(
            read.as_ref().err().map(TodoServiceError::kind) == Some(ErrorKind::NotFound),
            "foreign read should be not found, got {read:?}"
        );
        let complete = engine.lifecycle.complete(&u2, created.id()).await;
        eyre::ensure!(complete.is_err(), "foreign completion should fail");
        let delete = engine.lifecycle.delete(&u2, created.id()).await;
        eyre::ensure!(delete.is_err(), "foreign delete should fail");

        let stored = engine.lifecycle.get(&u1, created.id()).await?;
        eyre::ensure!(stored.status() == TodoStatus::Active, "owner's todo is untouched");
        Ok(())
    })
}

#[rstest]
fn edits_persist_and_deleted_todos_reject_them(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        let created = engine
            .lifecycle
            .create(
                &u1,
                CreateTodoRequest::new("Draft").with_description("first pass"),
            )
            .await?;
        engine.clock.advance(Duration::minutes(1));

        let updated = engine
            .lifecycle
            .update(
                &u1,
                created.id(),
                UpdateTodoRequest::new()
                    .with_title("Final")
                    .clear_description()
                    .with_due_date("2026-04-01"),
            )
            .await?;
        let stored = engine.lifecycle.get(&u1, created.id()).await?;
        eyre::ensure!(stored == updated, "update result should match the stored row");
        eyre::ensure!(stored.title().as_str() == "Final", "title is replaced");
        eyre::ensure!(stored.description().is_none(), "description is cleared");
        eyre::ensure!(
            stored.due_date().map(|date| date.to_string()).as_deref() == Some("2026-04-01"),
            "due date is stored"
        );
        eyre::ensure!(stored.updated_at() > created.updated_at(), "updated_at advances");

        engine.lifecycle.delete(&u1, created.id()).await?;
        let edit = engine
            .lifecycle
            .update(&u1, created.id(), UpdateTodoRequest::new().with_title("Again"))
            .await;
        eyre::ensure!(
            matches!(edit, Err(TodoServiceError::EditDeleted(_))),
            "editing a deleted todo should fail, got {edit:?}"
        );
        Ok(())
    })
}

#[rstest]
fn inserting_the_same_todo_twice_is_a_duplicate(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        let created = engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("Once"))
            .await?;
        let again = engine.repository.insert(&created).await;
        eyre::ensure!(
            matches!(again, Err(TodoRepositoryError::DuplicateTodo(id)) if id == created.id()),
            "second insert should be a duplicate, got {again:?}"
        );
        Ok(())
    })
}

#[rstest]
#[case::deleted_without_timestamp("UPDATE todos SET status = 'DELETED' WHERE id = '{id}'")]
#[case::timestamp_without_deleted(
    "UPDATE todos SET deleted_at = NOW() WHERE id = '{id}'"
)]
fn status_and_deletion_time_must_agree(
    shared_test_cluster: &'static TestCluster,
    #[case] template: &str,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    let created = engine.block_on(
        engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("Consistent")),
    )?;
    let statement = template.replace("{id}", &created.id().to_string());

    let outcome = engine.database.execute(&statement);
    eyre::ensure!(
        outcome.is_err(),
        "constraint should reject `{statement}`, got {outcome:?}"
    );
    Ok(())
}
