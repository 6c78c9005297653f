//! Validated command objects built from raw request input.
//!
//! # Design
//! Each DTO exposes a `create` constructor that takes untyped JSON and returns
//! `Result<Self, String>`. The error is the exact client-facing message; the
//! HTTP layer decides how to wrap it. Validation is pure and never touches
//! storage.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::entity::TodoEntity;
use crate::time::parse_date;

pub const TEXT_REQUIRED: &str = "Text property is required";
pub const TEXT_EMPTY: &str = "Text property cannot be empty";
pub const INVALID_ID: &str = "Id must be a valid number";
pub const INVALID_COMPLETED_AT: &str = "CompletedAt must be a valid date";
pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";

/// Input for creating a todo. New todos always start incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoDto {
    pub text: String,
}

impl CreateTodoDto {
    pub fn create(raw: &Value) -> Result<Self, String> {
        match raw.get("text").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => Ok(Self {
                text: text.to_string(),
            }),
            _ => Err(TEXT_REQUIRED.to_string()),
        }
    }
}

/// Partial update of an existing todo.
///
/// `completed_at` is doubly optional: `None` leaves the stored value alone,
/// `Some(None)` clears it, `Some(Some(t))` sets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoDto {
    pub id: i64,
    pub text: Option<String>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateTodoDto {
    pub fn create(raw: &Value) -> Result<Self, String> {
        let props = raw.as_object().ok_or_else(|| BODY_NOT_OBJECT.to_string())?;

        let id = props
            .get("id")
            .and_then(parse_id)
            .ok_or_else(|| INVALID_ID.to_string())?;

        let text = match props.get("text") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
            Some(_) => return Err(TEXT_EMPTY.to_string()),
        };

        let completed_at = match props.get("completedAt") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(raw) => {
                let parsed = parse_date(raw)
                    .ok_or_else(|| INVALID_COMPLETED_AT.to_string())?;
                Some(Some(parsed))
            }
        };

        Ok(Self {
            id,
            text,
            completed_at,
        })
    }

    /// Whether applying this update could change anything.
    pub fn has_changes(&self) -> bool {
        self.text.is_some() || self.completed_at.is_some()
    }

    /// Merge into `current`: a field is replaced only when present here.
    pub fn apply_to(&self, mut current: TodoEntity) -> TodoEntity {
        if let Some(text) = &self.text {
            current.text = text.clone();
        }
        if let Some(completed_at) = self.completed_at {
            current.completed_at = completed_at;
        }
        current
    }
}

/// Accept a positive integer given either as a JSON number or a numeric string.
fn parse_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (id > 0).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::format_timestamp;
    use serde_json::json;

    // --- create ---

    #[test]
    fn create_accepts_text() {
        let dto = CreateTodoDto::create(&json!({"text": "Hola mundo1"}))
            .unwrap();
        assert_eq!(dto.text, "Hola mundo1");
    }

    #[test]
    fn create_ignores_completed_at() {
        let raw = json!({"text": "x", "completedAt": "2024-11-21"});
        let dto = CreateTodoDto::create(&raw).unwrap();
        assert_eq!(
            dto,
            CreateTodoDto {
                text: "x".to_string()
            }
        );
    }

    #[test]
    fn create_rejects_missing_empty_or_blank_text() {
        for raw in [
            json!({}),
            json!({"text": ""}),
            json!({"text": "  \t"}),
            json!({"text": 42}),
            json!(null),
        ] {
            assert_eq!(
                CreateTodoDto::create(&raw).unwrap_err(),
                TEXT_REQUIRED,
                "input: {raw}"
            );
        }
    }

    // --- update ---

    #[test]
    fn update_requires_positive_numeric_id() {
        for raw in [
            json!({}),
            json!({"id": "abc"}),
            json!({"id": 0}),
            json!({"id": -1}),
            json!({"id": 1.5}),
        ] {
            assert_eq!(
                UpdateTodoDto::create(&raw).unwrap_err(),
                INVALID_ID,
                "input: {raw}"
            );
        }
    }

    #[test]
    fn update_accepts_id_as_string() {
        let dto = UpdateTodoDto::create(&json!({"id": "12"})).unwrap();
        assert_eq!(dto.id, 12);
        assert!(!dto.has_changes());
    }

    #[test]
    fn update_rejects_non_object() {
        assert_eq!(
            UpdateTodoDto::create(&json!([1, 2])).unwrap_err(),
            BODY_NOT_OBJECT
        );
    }

    #[test]
    fn update_rejects_empty_text() {
        let err = UpdateTodoDto::create(&json!({"id": 1, "text": ""}))
            .unwrap_err();
        assert_eq!(err, TEXT_EMPTY);
    }

    #[test]
    fn update_rejects_invalid_completed_at() {
        let raw = json!({"id": 1, "completedAt": "not-a-date"});
        let err = UpdateTodoDto::create(&raw).unwrap_err();
        assert_eq!(err, INVALID_COMPLETED_AT);
    }

    #[test]
    fn update_rejects_dates_past_year_9999() {
        for raw in [json!(253_402_300_800_000_i64), json!("10000-01-01")] {
            let err = UpdateTodoDto::create(&json!({"id": 1, "completedAt": raw}))
                .unwrap_err();
            assert_eq!(err, INVALID_COMPLETED_AT, "input: {raw}");
        }
    }

    #[test]
    fn update_distinguishes_absent_and_null_completed_at() {
        let absent = UpdateTodoDto::create(&json!({"id": 1, "text": "x"}))
            .unwrap();
        assert_eq!(absent.completed_at, None);

        let cleared = UpdateTodoDto::create(&json!({"id": 1, "completedAt": null}))
            .unwrap();
        assert_eq!(cleared.completed_at, Some(None));
        assert!(cleared.has_changes());

        let set = UpdateTodoDto::create(&json!({"id": 1, "completedAt": "2024-11-21"}))
            .unwrap();
        let stamp = set.completed_at.flatten().unwrap();
        assert_eq!(format_timestamp(&stamp), "2024-11-21T00:00:00.000Z");
    }

    #[test]
    fn apply_to_keeps_fields_that_are_not_supplied() {
        let raw = json!({"id": 1, "text": "Old", "completedAt": "2024-01-01"});
        let current = TodoEntity::from_object(&raw).unwrap();

        let text_only = UpdateTodoDto::create(&json!({"id": 1, "text": "New"}))
            .unwrap();
        let merged = text_only.apply_to(current.clone());
        assert_eq!(merged.text, "New");
        assert_eq!(merged.completed_at, current.completed_at);

        let date_only = UpdateTodoDto::create(&json!({"id": 1, "completedAt": null}))
            .unwrap();
        let merged = date_only.apply_to(current.clone());
        assert_eq!(merged.text, "Old");
        assert!(merged.completed_at.is_none());

        let nothing = UpdateTodoDto::create(&json!({"id": 1})).unwrap();
        assert_eq!(nothing.apply_to(current.clone()), current);
    }
}
