//! Storage adapters backing the todo repository.

pub mod sqlite;

pub use sqlite::SqliteTodoDatasource;
