//! HTTP service exposing the todo use-cases.
//!
//! # Overview
//! Wires `todo-core` to the outside world: environment config, a SQLite
//! datasource, axum routes under `/api/todos`, static file serving and the
//! server lifecycle.

pub mod config;
pub mod datasource;
pub mod presentation;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use todo_core::{DatasourceRepository, TodoDatasource, TodoRepository};

pub use config::{Config, ConfigError};
pub use datasource::SqliteTodoDatasource;
pub use presentation::{AppRoutes, Server, ServerError, ServerOptions, TodosController};

/// API routes backed by `datasource`.
pub fn app(datasource: Arc<dyn TodoDatasource>) -> Router {
    let repository: Arc<dyn TodoRepository> = Arc::new(DatasourceRepository::new(datasource));
    AppRoutes::routes(repository)
}
