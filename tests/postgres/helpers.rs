//! Services wired over a fresh `PostgreSQL` database.

use super::cluster::TestDatabase;
use crate::clock::SteppingClock;
use chrono::Duration;
use eyre::WrapErr;
use pg_embedded_setup_unpriv::TestCluster;
use std::future::Future;
use std::sync::Arc;
use todo_keeper::retention::RetentionSweeper;
use todo_keeper::todo::{
    adapters::postgres::PostgresTodoRepository,
    domain::{OwnerId, Todo},
    services::{CreateTodoRequest, TodoLifecycleService, TrashService},
};
use tokio::runtime::Runtime;

/// Lifecycle, trash, and sweep services sharing one database and one clock.
///
/// Services are declared before the database so their pool handles close
/// before it is dropped.
pub struct PgEngine {
    pub runtime: Runtime,
    pub clock: Arc<SteppingClock>,
    pub repository: Arc<PostgresTodoRepository>,
    pub lifecycle: TodoLifecycleService<PostgresTodoRepository, SteppingClock>,
    pub trash: TrashService<PostgresTodoRepository, SteppingClock>,
    pub sweeper: RetentionSweeper<PostgresTodoRepository, SteppingClock>,
    pub database: TestDatabase,
}

impl PgEngine {
    /// Wires services over a fresh database on `cluster`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or the runtime cannot be created.
    pub fn start(cluster: &'static TestCluster) -> eyre::Result<Self> {
        let database = TestDatabase::create(cluster)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("build test runtime")?;
        let clock = Arc::new(SteppingClock::reference());
        let repository = Arc::new(PostgresTodoRepository::new(database.pool()?));

        Ok(Self {
            runtime,
            lifecycle: TodoLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock)),
            trash: TrashService::new(Arc::clone(&repository), Arc::clone(&clock)),
            sweeper: RetentionSweeper::new(Arc::clone(&repository), Arc::clone(&clock)),
            repository,
            clock,
            database,
        })
    }

    /// Drives `future` to completion on the test runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Creates and soft-deletes a todo as if the deletion happened
    /// `days_ago` days before the current clock reading.
    ///
    /// # Errors
    ///
    /// Returns an error if creation or deletion fails.
    pub async fn trashed_days_ago(
        &self,
        owner: &OwnerId,
        title: &str,
        days_ago: i64,
    ) -> eyre::Result<Todo> {
        self.clock.rewind(Duration::days(days_ago));
        let outcome = async {
            let created = self
                .lifecycle
                .create(owner, CreateTodoRequest::new(title))
                .await?;
            self.lifecycle.delete(owner, created.id()).await
        }
        .await;
        self.clock.advance(Duration::days(days_ago));
        Ok(outcome?)
    }
}

/// Parses an owner identifier.
///
/// # Errors
///
/// Returns an error if the identifier is blank.
pub fn owner(value: &str) -> eyre::Result<OwnerId> {
    Ok(OwnerId::new(value)?)
}

/// Returns the titles of `todos` in order.
#[must_use]
pub fn titles(todos: &[Todo]) -> Vec<String> {
    todos
        .iter()
        .map(|todo| todo.title().as_str().to_owned())
        .collect()
}
