use std::sync::Arc;

use crate::dtos::UpdateTodoDto;
use crate::entity::TodoEntity;
use crate::error::TodoError;
use crate::repository::TodoRepository;
use crate::use_cases::todo_not_found;

pub struct UpdateTodo {
    repository: Arc<dyn TodoRepository>,
}

impl UpdateTodo {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Merge `dto` into an existing todo. An update that names no field
    /// returns the stored todo without writing.
    pub async fn execute(&self, dto: UpdateTodoDto) -> Result<TodoEntity, TodoError> {
        let id = dto.id;
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| todo_not_found(id))?;
        if !dto.has_changes() {
            return Ok(current);
        }

        // The todo can vanish between the lookup and the write.
        let updated = self
            .repository
            .update_by_id(dto)
            .await?
            .ok_or_else(|| todo_not_found(id))?;
        Ok(updated)
    }
}
