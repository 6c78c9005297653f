use std::sync::Arc;

use crate::entity::TodoEntity;
use crate::error::TodoError;
use crate::repository::TodoRepository;
use crate::use_cases::todo_not_found;

pub struct DeleteTodo {
    repository: Arc<dyn TodoRepository>,
}

impl DeleteTodo {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Delete a todo and return its last known state.
    pub async fn execute(&self, id: i64) -> Result<TodoEntity, TodoError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| todo_not_found(id))?;
        let deleted = self
            .repository
            .delete_by_id(id)
            .await?
            .ok_or_else(|| todo_not_found(id))?;
        Ok(deleted)
    }
}
