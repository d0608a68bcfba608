//! `PostgreSQL` repository implementation for todo storage.

use super::{
    models::{NewTodoRow, TodoChangeset, TodoRow},
    schema::todos,
};
use crate::todo::{
    domain::{
        OwnerId, PersistedTodoData, PurgeCutoff, RestoreTarget, Todo, TodoId, TodoPatch,
        TodoPriority, TodoStatus, TodoTitle,
    },
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
    query::{DeletionScope, SortDirection, SortField, TodoQuery, TodoSort},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Integer, Text, Timestamptz, Uuid as SqlUuid, Varchar};

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

const RETURNING_COLUMNS: &str = concat!(
    "RETURNING id, owner_id, title, description, memo, priority, status, due_date, ",
    "created_at, updated_at, completed_at, deleted_at",
);

/// `PostgreSQL`-backed todo repository.
///
/// State transitions are single `UPDATE ... WHERE <predicate> RETURNING`
/// statements, so the affected-row count decides whether a transition won.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: TodoPgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn insert(&self, todo: &Todo) -> TodoRepositoryResult<Todo> {
        let todo_id = todo.id();
        let new_row = to_new_row(todo);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(todos::table)
                .values(&new_row)
                .returning(TodoRow::as_returning())
                .get_result::<TodoRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateTodo(todo_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            row_to_todo(row)
        })
        .await
    }

    async fn find_by_id(&self, owner: &OwnerId, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = todos::table
                .filter(todos::id.eq(id.into_inner()))
                .filter(todos::owner_id.eq(&owner_id))
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn list(&self, query: &TodoQuery) -> TodoRepositoryResult<Vec<Todo>> {
        let lookup = query.clone();
        self.run_blocking(move |connection| {
            let pagination = lookup.pagination();
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            let rows = ordered(filtered(&lookup), lookup.sort())
                .select(TodoRow::as_select())
                .limit(i64::from(pagination.limit()))
                .offset(offset)
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_todo).collect()
        })
        .await
    }

    async fn count(&self, query: &TodoQuery) -> TodoRepositoryResult<u64> {
        let lookup = query.clone();
        self.run_blocking(move |connection| {
            let total = filtered(&lookup)
                .count()
                .get_result::<i64>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            u64::try_from(total).map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn apply_patch(
        &self,
        owner: &OwnerId,
        id: TodoId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        let owner_id = owner.as_str().to_owned();
        let changeset = to_changeset(patch, now);
        self.run_blocking(move |connection| {
            let row = diesel::update(
                todos::table
                    .filter(todos::id.eq(id.into_inner()))
                    .filter(todos::owner_id.eq(&owner_id))
                    .filter(todos::deleted_at.is_null()),
            )
            .set(&changeset)
            .returning(TodoRow::as_returning())
            .get_result::<TodoRow>(connection)
            .optional()
            .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn complete(
        &self,
        owner: &OwnerId,
        id: TodoId,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let statement = format!(
                "{} {RETURNING_COLUMNS}",
                concat!(
                    "UPDATE todos SET status = 'COMPLETED', ",
                    "completed_at = COALESCE(completed_at, $3), updated_at = $3 ",
                    "WHERE id = $1 AND owner_id = $2 ",
                    "AND status = 'ACTIVE' AND deleted_at IS NULL",
                ),
            );
            let row = diesel::sql_query(statement)
                .bind::<SqlUuid, _>(id.into_inner())
                .bind::<Text, _>(&owner_id)
                .bind::<Timestamptz, _>(now)
                .get_result::<TodoRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn soft_delete(
        &self,
        owner: &OwnerId,
        id: TodoId,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = diesel::update(
                todos::table
                    .filter(todos::id.eq(id.into_inner()))
                    .filter(todos::owner_id.eq(&owner_id))
                    .filter(todos::deleted_at.is_null()),
            )
            .set((
                todos::status.eq(TodoStatus::Deleted.as_str()),
                todos::deleted_at.eq(Some(now)),
                todos::updated_at.eq(now),
            ))
            .returning(TodoRow::as_returning())
            .get_result::<TodoRow>(connection)
            .optional()
            .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn restore(
        &self,
        owner: &OwnerId,
        id: TodoId,
        target: RestoreTarget,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let statement = format!(
                "{} {RETURNING_COLUMNS}",
                concat!(
                    "UPDATE todos SET status = $3, deleted_at = NULL, ",
                    "completed_at = CASE WHEN $3 = 'COMPLETED' ",
                    "THEN COALESCE(completed_at, $4) ELSE completed_at END, ",
                    "updated_at = $4 ",
                    "WHERE id = $1 AND owner_id = $2 AND deleted_at IS NOT NULL",
                ),
            );
            let row = diesel::sql_query(statement)
                .bind::<SqlUuid, _>(id.into_inner())
                .bind::<Text, _>(&owner_id)
                .bind::<Varchar, _>(target.status().as_str())
                .bind::<Timestamptz, _>(now)
                .get_result::<TodoRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn purge(
        &self,
        owner: &OwnerId,
        id: TodoId,
        cutoff: PurgeCutoff,
    ) -> TodoRepositoryResult<bool> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                todos::table
                    .filter(todos::id.eq(id.into_inner()))
                    .filter(todos::owner_id.eq(&owner_id))
                    .filter(todos::deleted_at.is_not_null())
                    .filter(todos::deleted_at.le(cutoff.instant())),
            )
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn purge_expired(&self, cutoff: PurgeCutoff) -> TodoRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                todos::table
                    .filter(todos::deleted_at.is_not_null())
                    .filter(todos::deleted_at.le(cutoff.instant())),
            )
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)?;
            u64::try_from(removed).map_err(TodoRepositoryError::persistence)
        })
        .await
    }
}

/// Applies the owner scope and filter predicate; every user value is bound.
fn filtered(query: &TodoQuery) -> todos::BoxedQuery<'static, Pg> {
    let filter = query.filter();
    let mut statement = todos::table
        .into_boxed()
        .filter(todos::owner_id.eq(query.owner().as_str().to_owned()));

    if let Some(status) = filter.status {
        statement = statement.filter(todos::status.eq(status.as_str()));
    }
    if let Some(priority) = filter.priority {
        statement = statement.filter(todos::priority.eq(priority.as_str()));
    }
    if let Some(from) = filter.due_date_from {
        statement = statement.filter(todos::due_date.ge(from));
    }
    if let Some(to) = filter.due_date_to {
        statement = statement.filter(todos::due_date.le(to));
    }
    if let Some(term) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like(term));
        statement = statement.filter(
            todos::title
                .ilike(pattern.clone())
                .or(todos::description.ilike(pattern)),
        );
    }
    match filter.deletion {
        DeletionScope::ExcludeDeleted => statement.filter(todos::deleted_at.is_null()),
        DeletionScope::IncludeDeleted => statement,
        DeletionScope::OnlyDeleted => statement.filter(todos::deleted_at.is_not_null()),
    }
}

/// Applies the primary sort and the `created_at DESC, id ASC` tiebreak.
fn ordered(
    statement: todos::BoxedQuery<'static, Pg>,
    sort: TodoSort,
) -> todos::BoxedQuery<'static, Pg> {
    let primary = match (sort.field, sort.direction) {
        (SortField::DueDate, SortDirection::Asc) => statement.order_by(todos::due_date.asc()),
        (SortField::DueDate, SortDirection::Desc) => statement.order_by(todos::due_date.desc()),
        (SortField::Priority, SortDirection::Asc) => statement.order_by(priority_rank().asc()),
        (SortField::Priority, SortDirection::Desc) => statement.order_by(priority_rank().desc()),
        (SortField::CreatedAt, SortDirection::Asc) => statement.order_by(todos::created_at.asc()),
        (SortField::CreatedAt, SortDirection::Desc) => {
            statement.order_by(todos::created_at.desc())
        }
        (SortField::UpdatedAt, SortDirection::Asc) => statement.order_by(todos::updated_at.asc()),
        (SortField::UpdatedAt, SortDirection::Desc) => {
            statement.order_by(todos::updated_at.desc())
        }
        (SortField::DeletedAt, SortDirection::Asc) => statement.order_by(todos::deleted_at.asc()),
        (SortField::DeletedAt, SortDirection::Desc) => {
            statement.order_by(todos::deleted_at.desc())
        }
    };
    primary
        .then_order_by(todos::created_at.desc())
        .then_order_by(todos::id.asc())
}

fn priority_rank() -> SqlLiteral<Integer> {
    sql::<Integer>(concat!(
        "CASE priority WHEN 'LOW' THEN 0 WHEN 'NORMAL' THEN 1 ",
        "WHEN 'HIGH' THEN 2 ELSE 1 END",
    ))
}

/// Escapes `LIKE` wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_new_row(todo: &Todo) -> NewTodoRow {
    NewTodoRow {
        id: todo.id().into_inner(),
        owner_id: todo.owner_id().as_str().to_owned(),
        title: todo.title().as_str().to_owned(),
        description: todo.description().map(str::to_owned),
        memo: todo.memo().map(str::to_owned),
        priority: todo.priority().as_str().to_owned(),
        status: todo.status().as_str().to_owned(),
        due_date: todo.due_date(),
        created_at: todo.created_at(),
        updated_at: todo.updated_at(),
        completed_at: todo.completed_at(),
        deleted_at: todo.deleted_at(),
    }
}

fn to_changeset(patch: &TodoPatch, now: DateTime<Utc>) -> TodoChangeset {
    TodoChangeset {
        title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
        description: patch.description.clone(),
        memo: patch.memo.clone(),
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
        due_date: patch.due_date,
        updated_at: now,
    }
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        owner_id,
        title,
        description,
        memo,
        priority,
        status,
        due_date,
        created_at,
        updated_at,
        completed_at,
        deleted_at,
    } = row;

    let data = PersistedTodoData {
        id: TodoId::from_uuid(id),
        owner_id: OwnerId::new(owner_id).map_err(TodoRepositoryError::persistence)?,
        title: TodoTitle::new(title).map_err(TodoRepositoryError::persistence)?,
        description,
        memo,
        priority: TodoPriority::try_from(priority.as_str())
            .map_err(TodoRepositoryError::persistence)?,
        status: TodoStatus::try_from(status.as_str()).map_err(TodoRepositoryError::persistence)?,
        due_date,
        created_at,
        updated_at,
        completed_at,
        deleted_at,
    };
    Ok(Todo::from_persisted(data))
}
