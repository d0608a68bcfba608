//! Application services for todo lifecycle and trash orchestration.

mod error;
mod lifecycle;
mod trash;

pub use error::{ErrorKind, TodoServiceError, TodoServiceResult};
pub use lifecycle::{CreateTodoRequest, TodoLifecycleService, UpdateTodoRequest};
pub use trash::{TrashItem, TrashPage, TrashPageMeta, TrashPageRequest, TrashService};
