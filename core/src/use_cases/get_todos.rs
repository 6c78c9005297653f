use std::sync::Arc;

use crate::entity::TodoEntity;
use crate::error::TodoError;
use crate::repository::TodoRepository;

pub struct GetTodos {
    repository: Arc<dyn TodoRepository>,
}

impl GetTodos {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<TodoEntity>, TodoError> {
        Ok(self.repository.get_all().await?)
    }
}
