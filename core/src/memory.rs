//! In-process datasource.
//!
//! # Design
//! Holds todos in a `BTreeMap` keyed by id behind a `tokio::sync::RwLock`, so
//! iteration is already in ascending id order. Ids come from a counter that
//! only moves forward; a deleted id is never handed out again.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::datasource::TodoDatasource;
use crate::dtos::{CreateTodoDto, UpdateTodoDto};
use crate::entity::TodoEntity;
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    todos: BTreeMap<i64, TodoEntity>,
}

/// A `TodoDatasource` that keeps everything in memory.
#[derive(Debug, Default)]
pub struct InMemoryTodoDatasource {
    store: RwLock<Store>,
}

impl InMemoryTodoDatasource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoDatasource for InMemoryTodoDatasource {
    async fn create(&self, dto: CreateTodoDto) -> Result<TodoEntity, StorageError> {
        let mut store = self.store.write().await;
        let id = store.last_id + 1;
        let todo = TodoEntity::new(id, dto.text, None)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        store.last_id = id;
        store.todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn get_all(&self) -> Result<Vec<TodoEntity>, StorageError> {
        let store = self.store.read().await;
        Ok(store.todos.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError> {
        let store = self.store.read().await;
        Ok(store.todos.get(&id).cloned())
    }

    async fn update_by_id(&self, dto: UpdateTodoDto) -> Result<Option<TodoEntity>, StorageError> {
        let mut store = self.store.write().await;
        let Some(slot) = store.todos.get_mut(&dto.id) else {
            return Ok(None);
        };
        *slot = dto.apply_to(slot.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError> {
        let mut store = self.store.write().await;
        Ok(store.todos.remove(&id))
    }
}
