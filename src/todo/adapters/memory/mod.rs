//! In-memory adapters for todo lifecycle ports.

mod todo;

pub use todo::InMemoryTodoRepository;
