//! List item entities: todos, goals, reminders.
//!
//! Todos and goals are structurally identical but live as separate types
//! and separate persisted collections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub text: String,
    /// "HH:MM" display label. Stored only -- no alarm is ever triggered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
        }
    }
}

impl Goal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
        }
    }
}

impl Reminder {
    pub fn new(text: impl Into<String>, time: Option<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            time,
        }
    }
}

/// Fresh unique id. Ids are never reused.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
