//! The todo entity.
//!
//! # Design
//! `TodoEntity` is a plain value: datasources hand out independent snapshots,
//! so callers may keep or mutate them without affecting storage. Completion
//! is not stored as a flag; it is derived from `completed_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::time::{optional_timestamp, parse_date};

/// Reasons a record cannot be turned into a `TodoEntity`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("Id is required")]
    MissingId,

    #[error("Text is required")]
    MissingText,

    #[error("CompletedAt is not a valid date")]
    InvalidCompletedAt,
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoEntity {
    pub id: i64,
    pub text: String,
    #[serde(default, with = "optional_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TodoEntity {
    /// Build an entity, enforcing a positive id and non-blank text.
    pub fn new(
        id: i64,
        text: impl Into<String>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, EntityError> {
        let text = text.into();
        if id <= 0 {
            return Err(EntityError::MissingId);
        }
        if text.trim().is_empty() {
            return Err(EntityError::MissingText);
        }
        Ok(Self {
            id,
            text,
            completed_at,
        })
    }

    /// Build an entity from a loosely typed JSON object such as
    /// `{"id": 1, "text": "...", "completedAt": "2024-11-21"}`.
    pub fn from_object(object: &Value) -> Result<Self, EntityError> {
        let id = object
            .get("id")
            .and_then(Value::as_i64)
            .ok_or(EntityError::MissingId)?;
        let text = object
            .get("text")
            .and_then(Value::as_str)
            .ok_or(EntityError::MissingText)?;

        let completed_at = match object.get("completedAt") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(parse_date(raw).ok_or(EntityError::InvalidCompletedAt)?),
        };

        Self::new(id, text, completed_at)
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_rejects_non_positive_id() {
        assert_eq!(
            TodoEntity::new(0, "x", None).unwrap_err(),
            EntityError::MissingId
        );
        assert_eq!(
            TodoEntity::new(-3, "x", None).unwrap_err(),
            EntityError::MissingId
        );
    }

    #[test]
    fn new_rejects_blank_text() {
        assert_eq!(
            TodoEntity::new(1, "", None).unwrap_err(),
            EntityError::MissingText
        );
        assert_eq!(
            TodoEntity::new(1, "   ", None).unwrap_err(),
            EntityError::MissingText
        );
    }

    #[test]
    fn completion_is_derived_from_completed_at() {
        let open = TodoEntity::new(1, "Walk dog", None).unwrap();
        assert!(!open.is_completed());

        let raw = json!({"id": 1, "text": "Walk dog", "completedAt": "2024-11-21"});
        let done = TodoEntity::from_object(&raw).unwrap();
        assert!(done.is_completed());
    }

    #[test]
    fn from_object_rejects_bad_completed_at() {
        let raw = json!({"id": 1, "text": "x", "completedAt": "yesterday"});
        let err = TodoEntity::from_object(&raw).unwrap_err();
        assert_eq!(err, EntityError::InvalidCompletedAt);
    }

    #[test]
    fn from_object_requires_id_and_text() {
        let no_id = TodoEntity::from_object(&json!({"text": "x"})).unwrap_err();
        assert_eq!(no_id, EntityError::MissingId);
        let no_text = TodoEntity::from_object(&json!({"id": 4})).unwrap_err();
        assert_eq!(no_text, EntityError::MissingText);
    }

    #[test]
    fn serializes_to_wire_shape() {
        let raw = json!({"id": 7, "text": "Hola mundo1", "completedAt": "2024-11-21"});
        let todo = TodoEntity::from_object(&raw).unwrap();
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            json!({"id": 7, "text": "Hola mundo1", "completedAt": "2024-11-21T00:00:00.000Z"})
        );

        let open = TodoEntity::new(8, "Hola mundo2", None).unwrap();
        assert_eq!(
            serde_json::to_value(&open).unwrap(),
            json!({"id": 8, "text": "Hola mundo2", "completedAt": null})
        );
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let raw = r#"{"id":3,"text":"Read","completedAt":"2024-11-21T00:00:00.000Z"}"#;
        let todo: TodoEntity = serde_json::from_str(raw).unwrap();
        assert_eq!(todo.id, 3);
        assert!(todo.is_completed());

        let open: TodoEntity = serde_json::from_str(r#"{"id":3,"text":"Read"}"#).unwrap();
        assert!(open.completed_at.is_none());
    }
}
