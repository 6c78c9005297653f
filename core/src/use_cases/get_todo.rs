use std::sync::Arc;

use crate::entity::TodoEntity;
use crate::error::TodoError;
use crate::repository::TodoRepository;
use crate::use_cases::todo_not_found;

pub struct GetTodo {
    repository: Arc<dyn TodoRepository>,
}

impl GetTodo {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i64) -> Result<TodoEntity, TodoError> {
        let todo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| todo_not_found(id))?;
        Ok(todo)
    }
}
