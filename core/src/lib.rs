//! Domain core for the todo service.
//!
//! # Overview
//! Entities, validated DTOs, the storage capability traits and the five
//! use-cases (create, list, get, update, delete). Nothing here knows about
//! HTTP or a particular database.
//!
//! # Design
//! - `TodoDatasource` is implemented by storage adapters; `TodoRepository`
//!   is what use-cases see. `DatasourceRepository` bridges the two.
//! - DTO constructors return `Result<Self, String>` with the exact message a
//!   client should see.
//! - Use-cases return `TodoError`, which tags expected domain failures
//!   (`CustomError`) apart from storage failures.
//! - `InMemoryTodoDatasource` stands in for real storage in tests.

pub mod datasource;
pub mod dtos;
pub mod entity;
pub mod error;
pub mod memory;
pub mod repository;
pub mod time;
pub mod use_cases;

pub use datasource::TodoDatasource;
pub use dtos::{CreateTodoDto, UpdateTodoDto};
pub use entity::{EntityError, TodoEntity};
pub use error::{CustomError, StorageError, TodoError};
pub use memory::InMemoryTodoDatasource;
pub use repository::{DatasourceRepository, TodoRepository};
pub use use_cases::{CreateTodo, DeleteTodo, GetTodo, GetTodos, UpdateTodo};
