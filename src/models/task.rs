//! Task create/update bodies.
//!
//! This module defines:
//! - `CreateTaskRequest` / `NewTask`: browser body and the task Asana receives on create
//! - `UpdateTaskRequest` / `TaskUpdate`: browser body and the partial task sent on update
//!
//! Field values are passed through as raw JSON; Asana validates them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for `POST /asana/task`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Write release notes",
///   "notes": "Cover the new export flow",
///   "workspace": "1200000000000001",
///   "project": "1200000000000002",
///   "assignee": "me",
///   "due_on": "2026-11-01"
/// }
/// ```
///
/// Every field is optional; nothing is validated here. An explicit `null`
/// is kept (`Some(Value::Null)`) and forwarded; only absent fields are `None`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub workspace: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub project: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub assignee: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub due_on: Option<Value>,
}

/// A field that appears in the body, `null` included.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Task body sent to Asana on create.
///
/// `projects` is always a single-element list holding the requested
/// project, `[null]` when none was given.
#[derive(Debug, Serialize)]
pub struct NewTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Value>,
    pub projects: Vec<Option<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<Value>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            name: request.name,
            notes: request.notes,
            workspace: request.workspace,
            assignee: request.assignee,
            projects: vec![request.project],
            due_on: request.due_on,
        }
    }
}

/// Request body for `PUT /asana/task/{id}`.
///
/// Any subset of the fields may be present; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<Value>,
    pub notes: Option<Value>,
    pub assignee: Option<Value>,
    pub due_on: Option<Value>,
}

/// Partial task sent to Asana on update.
///
/// Only truthy fields survive the conversion, so a field that is absent,
/// `null`, `false`, `0` or `""` in the request is left untouched upstream.
#[derive(Debug, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<Value>,
}

impl From<UpdateTaskRequest> for TaskUpdate {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            name: request.name.filter(is_truthy),
            notes: request.notes.filter(is_truthy),
            assignee: request.assignee.filter(is_truthy),
            due_on: request.due_on.filter(is_truthy),
        }
    }
}

/// JavaScript-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
