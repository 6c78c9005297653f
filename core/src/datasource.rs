//! Storage capability implemented by concrete adapters.

use async_trait::async_trait;

use crate::dtos::{CreateTodoDto, UpdateTodoDto};
use crate::entity::TodoEntity;
use crate::error::StorageError;

/// Persistence operations for todos.
///
/// Absence is reported as `Ok(None)`, never as an error, so callers can tell
/// "no such todo" apart from a failing store.
#[async_trait]
pub trait TodoDatasource: Send + Sync {
    /// Persist a new todo and return it with its assigned id.
    async fn create(&self, dto: CreateTodoDto) -> Result<TodoEntity, StorageError>;

    // TODO: paginate once the list endpoint accepts limit/offset.
    /// All todos in ascending id order.
    async fn get_all(&self) -> Result<Vec<TodoEntity>, StorageError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError>;

    /// Merge `dto` into the stored todo; see `UpdateTodoDto::apply_to`.
    async fn update_by_id(&self, dto: UpdateTodoDto) -> Result<Option<TodoEntity>, StorageError>;

    /// Remove a todo, returning its last stored state.
    async fn delete_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError>;
}
