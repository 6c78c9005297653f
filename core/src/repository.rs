//! Use-case facing facade over a datasource.
//!
//! # Design
//! Use-cases depend on `TodoRepository`, never on a storage technology.
//! `DatasourceRepository` is the only implementation and forwards each call
//! unchanged; swapping SQLite for the in-memory store happens by handing it a
//! different `TodoDatasource`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::datasource::TodoDatasource;
use crate::dtos::{CreateTodoDto, UpdateTodoDto};
use crate::entity::TodoEntity;
use crate::error::StorageError;

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create(&self, dto: CreateTodoDto) -> Result<TodoEntity, StorageError>;
    async fn get_all(&self) -> Result<Vec<TodoEntity>, StorageError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError>;
    async fn update_by_id(&self, dto: UpdateTodoDto) -> Result<Option<TodoEntity>, StorageError>;
    async fn delete_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError>;
}

/// Repository that delegates every operation to a `TodoDatasource`.
#[derive(Clone)]
pub struct DatasourceRepository {
    datasource: Arc<dyn TodoDatasource>,
}

impl DatasourceRepository {
    pub fn new(datasource: Arc<dyn TodoDatasource>) -> Self {
        Self { datasource }
    }
}

#[async_trait]
impl TodoRepository for DatasourceRepository {
    async fn create(&self, dto: CreateTodoDto) -> Result<TodoEntity, StorageError> {
        self.datasource.create(dto).await
    }

    async fn get_all(&self) -> Result<Vec<TodoEntity>, StorageError> {
        self.datasource.get_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError> {
        self.datasource.find_by_id(id).await
    }

    async fn update_by_id(&self, dto: UpdateTodoDto) -> Result<Option<TodoEntity>, StorageError> {
        self.datasource.update_by_id(dto).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError> {
        self.datasource.delete_by_id(id).await
    }
}
