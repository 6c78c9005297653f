pub mod controller;
pub mod routes;
pub mod server;

pub use controller::TodosController;
pub use routes::{AppRoutes, TodoRoutes};
pub use server::{Server, ServerError, ServerOptions};
