//! Paginated trash view and gated permanent purge.

use super::{TodoLifecycleService, TodoServiceError, TodoServiceResult};
use crate::todo::{
    domain::{OwnerId, Todo, TodoId},
    ports::TodoRepository,
    query::{Pagination, TodoQuery, lenient::lenient_integer},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw trash paging parameters.
///
/// Values that are absent, zero, or not numeric fall back to page one and the
/// default page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrashPageRequest {
    /// One-based page number.
    #[serde(deserialize_with = "lenient_integer")]
    pub page: Option<i64>,
    /// Requested page size.
    #[serde(deserialize_with = "lenient_integer")]
    pub page_size: Option<i64>,
}

impl TrashPageRequest {
    /// Creates a request for `page` with `page_size` items per page.
    #[must_use]
    pub const fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

/// A trashed todo annotated with the earliest instant it may be purged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashItem {
    /// The soft-deleted todo.
    #[serde(flatten)]
    pub todo: Todo,
    /// Earliest instant at which a purge is accepted.
    pub purgeable_at: Option<DateTime<Utc>>,
}

impl From<Todo> for TrashItem {
    fn from(todo: Todo) -> Self {
        let purgeable_at = todo.purgeable_at();
        Self { todo, purgeable_at }
    }
}

/// Paging metadata for a trash listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashPageMeta {
    /// One-based page number that was served.
    pub page: u64,
    /// Page size that was applied.
    pub page_size: u32,
    /// Number of trashed todos the owner has in total.
    pub total: u64,
    /// Number of pages at this page size.
    pub total_pages: u64,
}

/// One page of an owner's trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrashPage {
    /// Trashed todos, most recently deleted first.
    pub items: Vec<TrashItem>,
    /// Paging metadata.
    pub meta: TrashPageMeta,
}

/// Trash view over soft-deleted todos.
#[derive(Clone)]
pub struct TrashService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    lifecycle: TodoLifecycleService<R, C>,
    repository: Arc<R>,
}

impl<R, C> TrashService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a trash service over the same repository and clock as the
    /// lifecycle service it delegates purges to.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            lifecycle: TodoLifecycleService::new(Arc::clone(&repository), clock),
            repository,
        }
    }

    /// Lists one page of the owner's trash.
    ///
    /// The total is a separate count over the same owner and deletion scope.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::StoreUnavailable`] when persistence fails.
    pub async fn list_trash(
        &self,
        owner: &OwnerId,
        request: TrashPageRequest,
    ) -> TodoServiceResult<TrashPage> {
        let page = Pagination::page_number(request.page);
        let pagination = Pagination::from_page(request.page, request.page_size);
        let query = TodoQuery::trash(owner.clone(), pagination);

        let todos = self.repository.list(&query).await?;
        let total = self.repository.count(&query).await?;
        let page_size = pagination.limit();

        Ok(TrashPage {
            items: todos.into_iter().map(TrashItem::from).collect(),
            meta: TrashPageMeta {
                page,
                page_size,
                total,
                total_pages: total.div_ceil(u64::from(page_size)),
            },
        })
    }

    /// Permanently removes a trashed todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when the todo does not exist for
    /// this owner, is not in the trash, or is still inside the retention
    /// window.
    pub async fn purge_one(&self, owner: &OwnerId, id: TodoId) -> TodoServiceResult<()> {
        match self.lifecycle.purge(owner, id).await {
            Err(TodoServiceError::NotAllowed(todo_id)) => Err(TodoServiceError::NotFound(todo_id)),
            other => other,
        }
    }
}
