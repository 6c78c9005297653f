//! Application operations, one struct per use-case.
//!
//! Each use-case receives its repository at construction and exposes a single
//! `execute` method. They are cheap to build, so callers create one per
//! request.

mod create_todo;
mod delete_todo;
mod get_todo;
mod get_todos;
mod update_todo;

pub use create_todo::CreateTodo;
pub use delete_todo::DeleteTodo;
pub use get_todo::GetTodo;
pub use get_todos::GetTodos;
pub use update_todo::UpdateTodo;

use crate::error::CustomError;

pub(crate) fn todo_not_found(id: i64) -> CustomError {
    CustomError::not_found(format!("Todo with id: {id} not found"))
}
