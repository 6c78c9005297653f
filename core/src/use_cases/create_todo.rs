use std::sync::Arc;

use crate::dtos::CreateTodoDto;
use crate::entity::TodoEntity;
use crate::error::TodoError;
use crate::repository::TodoRepository;

pub struct CreateTodo {
    repository: Arc<dyn TodoRepository>,
}

impl CreateTodo {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, dto: CreateTodoDto) -> Result<TodoEntity, TodoError> {
        Ok(self.repository.create(dto).await?)
    }
}
