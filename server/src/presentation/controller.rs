//! HTTP adapter between axum and the todo use-cases.
//!
//! # Design
//! Handlers parse the path id and the body themselves so every client error
//! uses the same `{"error": "..."}` envelope. Bodies are JSON unless the
//! request says `application/x-www-form-urlencoded`. Use-cases are built per
//! request from the shared repository. `TodoError::Custom` carries its own
//! status; everything else becomes an opaque 500 and is logged here.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use serde_json::Value;
use todo_core::{
    CreateTodo, CreateTodoDto, CustomError, DeleteTodo, GetTodo, GetTodos, TodoError,
    TodoRepository, UpdateTodo, UpdateTodoDto,
};

pub const INVALID_ID_PARAM: &str = "ID argument is not a number";
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
pub const INVALID_FORM_BODY: &str = "Invalid form body";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Translate a use-case failure into a response.
fn handle_error(error: TodoError) -> Response {
    match error {
        TodoError::Custom(CustomError {
            status_code,
            message,
        }) => {
            let status = StatusCode::from_u16(status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorBody { error: message })).into_response()
        }
        TodoError::Storage(cause) => {
            tracing::error!(error = %cause, "todo request failed");
            let body = ErrorBody {
                error: INTERNAL_ERROR.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    handle_error(CustomError::bad_request(message).into())
}

/// Parse the `{id}` path segment.
///
/// A run of digits too large for `i64` is still a number, just one no todo
/// can have, so it answers 404 rather than 400.
fn parse_id(raw: &str) -> Result<i64, Response> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    let digits = raw
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let message = format!("Todo with id: {raw} not found");
        return Err(handle_error(CustomError::not_found(message).into()));
    }
    Err(bad_request(INVALID_ID_PARAM))
}

/// An empty JSON body is treated as `{}`.
fn parse_json(body: &Bytes) -> Result<Value, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|_| bad_request(INVALID_JSON_BODY))
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Request body as loose JSON, read from either a JSON or a urlencoded form
/// payload. Form fields arrive as strings.
pub struct RequestBody(pub Value);

impl<S> FromRequest<S> for RequestBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(fields) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|_| bad_request(INVALID_FORM_BODY))?;
            let object = fields
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            return Ok(Self(Value::Object(object)));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        parse_json(&body).map(Self)
    }
}

#[derive(Clone)]
pub struct TodosController {
    repository: Arc<dyn TodoRepository>,
}

impl TodosController {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_todos(State(controller): State<Self>) -> Response {
        match GetTodos::new(controller.repository).execute().await {
            Ok(todos) => Json(todos).into_response(),
            Err(e) => handle_error(e),
        }
    }

    pub async fn get_todo_by_id(
        State(controller): State<Self>,
        Path(id): Path<String>,
    ) -> Response {
        let id = match parse_id(&id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        match GetTodo::new(controller.repository).execute(id).await {
            Ok(todo) => Json(todo).into_response(),
            Err(e) => handle_error(e),
        }
    }

    pub async fn create_todo(
        State(controller): State<Self>,
        RequestBody(raw): RequestBody,
    ) -> Response {
        let dto = match CreateTodoDto::create(&raw) {
            Ok(dto) => dto,
            Err(message) => return bad_request(message),
        };
        match CreateTodo::new(controller.repository).execute(dto).await {
            Ok(todo) => (StatusCode::CREATED, Json(todo)).into_response(),
            Err(e) => handle_error(e),
        }
    }

    pub async fn update_todo(
        State(controller): State<Self>,
        Path(id): Path<String>,
        RequestBody(mut raw): RequestBody,
    ) -> Response {
        let id = match parse_id(&id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        // The path id wins over any id in the body.
        if let Some(props) = raw.as_object_mut() {
            props.insert("id".to_string(), Value::from(id));
        }
        let dto = match UpdateTodoDto::create(&raw) {
            Ok(dto) => dto,
            Err(message) => return bad_request(message),
        };
        match UpdateTodo::new(controller.repository).execute(dto).await {
            Ok(todo) => Json(todo).into_response(),
            Err(e) => handle_error(e),
        }
    }

    pub async fn delete_todo(
        State(controller): State<Self>,
        Path(id): Path<String>,
    ) -> Response {
        let id = match parse_id(&id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        match DeleteTodo::new(controller.repository).execute(id).await {
            Ok(todo) => Json(todo).into_response(),
            Err(e) => handle_error(e),
        }
    }
}
