//! In-memory repository for todo lifecycle tests and embedding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{OwnerId, PurgeCutoff, RestoreTarget, Todo, TodoId, TodoPatch},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
    query::TodoQuery,
};

/// Thread-safe in-memory todo repository.
///
/// Each conditional write holds the write lock for its whole
/// check-and-set, matching the atomicity of a single SQL statement.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    state: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, HashMap<TodoId, Todo>>> {
        self.state.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, HashMap<TodoId, Todo>>> {
        self.state.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Runs `transition` against an owned todo and returns the updated copy
    /// when the transition applied.
    fn transition(
        &self,
        owner: &OwnerId,
        id: TodoId,
        transition: impl FnOnce(&mut Todo) -> bool,
    ) -> TodoRepositoryResult<Option<Todo>> {
        let mut todos = self.write()?;
        let Some(todo) = todos
            .get_mut(&id)
            .filter(|todo| todo.owner_id() == owner)
        else {
            return Ok(None);
        };
        Ok(transition(todo).then(|| todo.clone()))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn insert(&self, todo: &Todo) -> TodoRepositoryResult<Todo> {
        let mut todos = self.write()?;
        if todos.contains_key(&todo.id()) {
            return Err(TodoRepositoryError::DuplicateTodo(todo.id()));
        }
        todos.insert(todo.id(), todo.clone());
        Ok(todo.clone())
    }

    async fn find_by_id(&self, owner: &OwnerId, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let todos = self.read()?;
        Ok(todos
            .get(&id)
            .filter(|todo| todo.owner_id() == owner)
            .cloned())
    }

    async fn list(&self, query: &TodoQuery) -> TodoRepositoryResult<Vec<Todo>> {
        let todos = self.read()?;
        let mut matching: Vec<&Todo> = todos.values().filter(|todo| query.matches(todo)).collect();
        let sort = query.sort();
        matching.sort_by(|left, right| sort.compare(left, right));

        let pagination = query.pagination();
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self, query: &TodoQuery) -> TodoRepositoryResult<u64> {
        let todos = self.read()?;
        let total = todos.values().filter(|todo| query.matches(todo)).count();
        u64::try_from(total).map_err(TodoRepositoryError::persistence)
    }

    async fn apply_patch(
        &self,
        owner: &OwnerId,
        id: TodoId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        self.transition(owner, id, |todo| todo.try_apply_patch(patch, now))
    }

    async fn complete(
        &self,
        owner: &OwnerId,
        id: TodoId,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        self.transition(owner, id, |todo| todo.try_complete(now))
    }

    async fn soft_delete(
        &self,
        owner: &OwnerId,
        id: TodoId,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        self.transition(owner, id, |todo| todo.try_soft_delete(now))
    }

    async fn restore(
        &self,
        owner: &OwnerId,
        id: TodoId,
        target: RestoreTarget,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        self.transition(owner, id, |todo| todo.try_restore(target, now))
    }

    async fn purge(
        &self,
        owner: &OwnerId,
        id: TodoId,
        cutoff: PurgeCutoff,
    ) -> TodoRepositoryResult<bool> {
        let mut todos = self.write()?;
        let eligible = todos
            .get(&id)
            .is_some_and(|todo| todo.owner_id() == owner && todo.is_purgeable(cutoff));
        if eligible {
            todos.remove(&id);
        }
        Ok(eligible)
    }

    async fn purge_expired(&self, cutoff: PurgeCutoff) -> TodoRepositoryResult<u64> {
        let mut todos = self.write()?;
        let before = todos.len();
        todos.retain(|_, todo| !todo.is_purgeable(cutoff));
        let removed = before - todos.len();
        u64::try_from(removed).map_err(TodoRepositoryError::persistence)
    }
}
