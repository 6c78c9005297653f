//! SQLite-backed `TodoDatasource`.
//!
//! # Design
//! A single `rusqlite::Connection` sits behind a `std::sync::Mutex`. Every
//! operation runs on the blocking pool via `spawn_blocking` so request tasks
//! never stall the runtime while SQLite does I/O. Multi-step operations
//! (read-merge-write, read-then-delete) run in one transaction.
//!
//! Timestamps are stored as RFC 3339 text with millisecond precision, the same
//! shape the API emits.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use todo_core::time::{format_timestamp, parse_date_str};
use todo_core::{CreateTodoDto, StorageError, TodoDatasource, TodoEntity, UpdateTodoDto};

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_create_todos.sql"))];

const SELECT_TODO: &str = "SELECT id, text, completed_at FROM todos";

fn db_err(e: impl std::fmt::Display) -> StorageError {
    StorageError::Database(e.to_string())
}

#[derive(Clone)]
pub struct SqliteTodoDatasource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoDatasource {
    /// Open (or create) the database at `path` and run pending migrations.
    /// The special path `:memory:` opens a private in-memory database.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        if path == ":memory:" {
            return Self::open_in_memory();
        }
        if let Some(parent) = Path::new(path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).map_err(db_err)?;
        }
        let conn = Connection::open(path).map_err(db_err)?;
        tracing::info!(path, "opened sqlite database");
        Self::with_migrations(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::with_migrations(conn)
    }

    fn with_migrations(mut conn: Connection) -> Result<Self, StorageError> {
        run_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` inside a transaction on the blocking pool.
    async fn transaction<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| StorageError::Database("connection lock poisoned".to_string()))?;
            let tx = conn.transaction().map_err(db_err)?;
            let value = f(&tx)?;
            tx.commit().map_err(db_err)?;
            Ok(value)
        })
        .await
        .map_err(db_err)?
    }
}

fn run_migrations(conn: &mut Connection) -> Result<(), StorageError> {
    let tx = conn.transaction().map_err(db_err)?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )
    .map_err(db_err)?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")
        .map_err(db_err)?
        .query_map([], |r| r.get(0))
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        tx.execute_batch(sql).map_err(db_err)?;
        tx.execute("INSERT INTO schema_migrations (version) VALUES (?1)", [version])
            .map_err(db_err)?;
        tracing::debug!(version, "applied migration");
    }

    tx.commit().map_err(db_err)
}

type TodoRow = (i64, String, Option<String>);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn to_entity((id, text, completed_at): TodoRow) -> Result<TodoEntity, StorageError> {
    let completed_at = completed_at
        .map(|raw| {
            parse_date_str(&raw).ok_or_else(|| {
                StorageError::Corrupt(format!("todo {id}: bad completed_at {raw:?}"))
            })
        })
        .transpose()?;
    TodoEntity::new(id, text, completed_at)
        .map_err(|e| StorageError::Corrupt(format!("todo {id}: {e}")))
}

fn find(tx: &Transaction<'_>, id: i64) -> Result<Option<TodoEntity>, StorageError> {
    tx.query_row(&format!("{SELECT_TODO} WHERE id = ?1"), [id], read_row)
        .optional()
        .map_err(db_err)?
        .map(to_entity)
        .transpose()
}

#[async_trait]
impl TodoDatasource for SqliteTodoDatasource {
    async fn create(&self, dto: CreateTodoDto) -> Result<TodoEntity, StorageError> {
        self.transaction(move |tx| {
            tx.execute("INSERT INTO todos (text, completed_at) VALUES (?1, NULL)", [&dto.text])
                .map_err(db_err)?;
            let id = tx.last_insert_rowid();
            find(tx, id)?.ok_or_else(|| {
                StorageError::Database(format!("inserted todo {id} was not readable"))
            })
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<TodoEntity>, StorageError> {
        self.transaction(|tx| {
            let rows = tx
                .prepare(&format!("{SELECT_TODO} ORDER BY id"))
                .map_err(db_err)?
                .query_map([], read_row)
                .map_err(db_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err)?;
            rows.into_iter().map(to_entity).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError> {
        self.transaction(move |tx| find(tx, id)).await
    }

    async fn update_by_id(&self, dto: UpdateTodoDto) -> Result<Option<TodoEntity>, StorageError> {
        self.transaction(move |tx| {
            let Some(current) = find(tx, dto.id)? else {
                return Ok(None);
            };
            let merged = dto.apply_to(current);
            tx.execute(
                "UPDATE todos SET text = ?1, completed_at = ?2 WHERE id = ?3",
                params![
                    merged.text,
                    merged.completed_at.as_ref().map(format_timestamp),
                    merged.id
                ],
            )
            .map_err(db_err)?;
            Ok(Some(merged))
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<TodoEntity>, StorageError> {
        self.transaction(move |tx| {
            let Some(current) = find(tx, id)? else {
                return Ok(None);
            };
            tx.execute("DELETE FROM todos WHERE id = ?1", [id])
                .map_err(db_err)?;
            Ok(Some(current))
        })
        .await
    }
}
