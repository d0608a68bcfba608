//! Typed, owner-scoped todo query built from sanitised options.

use super::ListTodosOptions;
use crate::todo::domain::{OwnerId, Todo, TodoPriority, TodoStatus};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;

/// Page size used when none (or an unreadable one) is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Primary sort key for todo listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Due date; todos without one sort last ascending and first descending.
    #[default]
    DueDate,
    /// Priority rank, `LOW` < `NORMAL` < `HIGH`.
    Priority,
    /// Creation timestamp.
    CreatedAt,
    /// Latest modification timestamp.
    UpdatedAt,
    /// Soft-deletion timestamp. Used by the trash view only.
    DeletedAt,
}

impl FromStr for SortField {
    type Err = ();

    /// Parses caller-selectable sort keys in camelCase or `snake_case`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dueDate" | "due_date" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(()),
        }
    }
}

/// Primary sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(())
        }
    }
}

/// Which todos a query sees with respect to soft deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeletionScope {
    /// Only todos with no deletion timestamp.
    #[default]
    ExcludeDeleted,
    /// Deleted and non-deleted todos alike.
    IncludeDeleted,
    /// Only soft-deleted todos.
    OnlyDeleted,
}

/// Row predicate applied within an owner's todos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Exact status match.
    pub status: Option<TodoStatus>,
    /// Exact priority match.
    pub priority: Option<TodoPriority>,
    /// Inclusive lower due-date bound.
    pub due_date_from: Option<NaiveDate>,
    /// Inclusive upper due-date bound.
    pub due_date_to: Option<NaiveDate>,
    /// Non-blank search term.
    pub search: Option<String>,
    /// Soft-deletion visibility.
    pub deletion: DeletionScope,
}

impl TodoFilter {
    /// Evaluates the predicate against a todo.
    ///
    /// Due-date bounds never match a todo without a due date.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        let deletion_ok = match self.deletion {
            DeletionScope::ExcludeDeleted => !todo.is_deleted(),
            DeletionScope::IncludeDeleted => true,
            DeletionScope::OnlyDeleted => todo.is_deleted(),
        };
        deletion_ok
            && self.status.is_none_or(|status| todo.status() == status)
            && self
                .priority
                .is_none_or(|priority| todo.priority() == priority)
            && self
                .due_date_from
                .is_none_or(|from| todo.due_date().is_some_and(|due| due >= from))
            && self
                .due_date_to
                .is_none_or(|to| todo.due_date().is_some_and(|due| due <= to))
            && self
                .search
                .as_deref()
                .is_none_or(|term| search_matches(todo, term))
    }
}

fn search_matches(todo: &Todo, term: &str) -> bool {
    let needle = term.to_lowercase();
    todo.title().as_str().to_lowercase().contains(&needle)
        || todo
            .description()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
}

/// Ordering of a todo listing.
///
/// The primary key is followed by `created_at` descending and then the todo
/// identifier, so ties always resolve the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoSort {
    /// Primary sort key.
    pub field: SortField,
    /// Primary sort direction.
    pub direction: SortDirection,
}

impl TodoSort {
    /// Compares two todos under this ordering.
    #[must_use]
    pub fn compare(&self, left: &Todo, right: &Todo) -> Ordering {
        let primary = match self.field {
            SortField::DueDate => nulls_last(left.due_date(), right.due_date()),
            SortField::Priority => left.priority().rank().cmp(&right.priority().rank()),
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            SortField::DeletedAt => nulls_last(left.deleted_at(), right.deleted_at()),
        };
        let directed = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        directed
            .then_with(|| right.created_at().cmp(&left.created_at()))
            .then_with(|| left.id().cmp(&right.id()))
    }
}

// Matches PostgreSQL's default: NULLs sort after every value ascending.
fn nulls_last<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Limit/offset window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    offset: u64,
}

impl Pagination {
    /// Builds a window from raw values, clamping `limit` to
    /// `1..=MAX_PAGE_SIZE` (absent or zero gives [`DEFAULT_PAGE_SIZE`]) and
    /// `offset` to at least zero (default zero).
    #[must_use]
    pub fn from_raw(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: Self::page_size(limit),
            offset: offset.map_or(0, |value| u64::try_from(value).unwrap_or(0)),
        }
    }

    /// Builds a window from a one-based page number and a page size, using
    /// [`Self::page_number`] and [`Self::page_size`].
    #[must_use]
    pub fn from_page(page: Option<i64>, page_size: Option<i64>) -> Self {
        let size = Self::page_size(page_size);
        let offset = (Self::page_number(page) - 1).saturating_mul(u64::from(size));
        Self {
            limit: size,
            offset,
        }
    }

    /// Sanitises a one-based page number; absent or below one is page one.
    #[must_use]
    pub fn page_number(page: Option<i64>) -> u64 {
        page.and_then(|value| u64::try_from(value).ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Sanitises a page size into `1..=MAX_PAGE_SIZE`. Absent or zero means
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn page_size(value: Option<i64>) -> u32 {
        match value {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(requested) => {
                let clamped = requested.clamp(1, i64::from(MAX_PAGE_SIZE));
                u32::try_from(clamped).unwrap_or(MAX_PAGE_SIZE)
            }
        }
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of records skipped.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_raw(None, None)
    }
}

/// Owner-scoped todo query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    owner: OwnerId,
    filter: TodoFilter,
    sort: TodoSort,
    pagination: Pagination,
}

impl TodoQuery {
    /// Sanitises raw list options into a query over `owner`'s todos.
    ///
    /// Unless `include_deleted` is set, soft-deleted todos are excluded even
    /// when the status filter asks for `DELETED`.
    #[must_use]
    pub fn from_options(owner: OwnerId, options: &ListTodosOptions) -> Self {
        let deletion = if options.include_deleted.unwrap_or(false) {
            DeletionScope::IncludeDeleted
        } else {
            DeletionScope::ExcludeDeleted
        };
        let filter = TodoFilter {
            status: options.status,
            priority: options.priority,
            due_date_from: options.due_date_from,
            due_date_to: options.due_date_to,
            search: options
                .search
                .clone()
                .filter(|term| !term.trim().is_empty()),
            deletion,
        };
        let sort = TodoSort {
            field: options.sort_by.unwrap_or_default(),
            direction: options.sort_direction.unwrap_or_default(),
        };
        Self {
            owner,
            filter,
            sort,
            pagination: Pagination::from_raw(options.limit, options.offset),
        }
    }

    /// Query over `owner`'s trash, most recently deleted first.
    #[must_use]
    pub fn trash(owner: OwnerId, pagination: Pagination) -> Self {
        Self {
            owner,
            filter: TodoFilter {
                deletion: DeletionScope::OnlyDeleted,
                ..TodoFilter::default()
            },
            sort: TodoSort {
                field: SortField::DeletedAt,
                direction: SortDirection::Desc,
            },
            pagination,
        }
    }

    /// Returns the owner every result belongs to.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the row predicate.
    #[must_use]
    pub const fn filter(&self) -> &TodoFilter {
        &self.filter
    }

    /// Returns the ordering.
    #[must_use]
    pub const fn sort(&self) -> TodoSort {
        self.sort
    }

    /// Returns the page window.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns `true` when `todo` belongs to the owner and passes the filter.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        todo.owner_id() == &self.owner && self.filter.matches(todo)
    }
}
