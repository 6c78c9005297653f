//! URL table for the API.

use std::sync::Arc;

use axum::{routing::get, Router};
use todo_core::TodoRepository;

use crate::presentation::controller::TodosController;

pub struct TodoRoutes;

impl TodoRoutes {
    pub fn routes(repository: Arc<dyn TodoRepository>) -> Router {
        let controller = TodosController::new(repository);
        Router::new()
            .route(
                "/api/todos",
                get(TodosController::get_todos).post(TodosController::create_todo),
            )
            .route(
                "/api/todos/{id}",
                get(TodosController::get_todo_by_id)
                    .put(TodosController::update_todo)
                    .delete(TodosController::delete_todo),
            )
            .with_state(controller)
    }
}

/// All application routes.
pub struct AppRoutes;

impl AppRoutes {
    pub fn routes(repository: Arc<dyn TodoRepository>) -> Router {
        Router::new().merge(TodoRoutes::routes(repository))
    }
}
