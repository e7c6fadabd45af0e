//! Task record and its editable projections.
//!
//! # Invariants
//! - `created_at` is stamped once by the store and never patched.
//! - `id` is never changed by `TodoPatch`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Task identifier assigned by the Task Store.
///
/// Signed because imported ids are derived arithmetically from foreign ids.
pub type TodoId = i64;

/// Task urgency.
///
/// Reads are lenient: a missing, `null` or unrecognised stored value becomes
/// `Medium`, so one odd task never fails the load of its whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Sort weight: high > medium > low.
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl From<serde_json::Value> for Priority {
    fn from(value: serde_json::Value) -> Self {
        value.as_str().and_then(Self::parse).unwrap_or_default()
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    /// Not validated here; callers trim and reject empty input.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Serialized as `null` when absent.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_share_id: Option<String>,
}

impl Todo {
    /// Builds a fresh, unshared, incomplete task.
    pub fn new(
        id: TodoId,
        text: impl Into<String>,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            priority,
            due_date,
            created_at,
            shared: false,
            share_id: None,
            imported: None,
            original_share_id: None,
        }
    }

    pub fn is_imported(&self) -> bool {
        self.imported.unwrap_or(false)
    }
}

/// Shallow partial update for a task.
///
/// `None` leaves a field untouched; for nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub shared: Option<bool>,
    pub share_id: Option<Option<String>>,
}

impl TodoPatch {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges every set field into `todo`.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(text) = &self.text {
            todo.text = text.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        if let Some(shared) = self.shared {
            todo.shared = shared;
        }
        if let Some(share_id) = &self.share_id {
            todo.share_id = share_id.clone();
        }
    }
}

/// Active view filter over the task collection.
///
/// Unknown values are kept verbatim so they survive a storage round trip;
/// they filter nothing out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
    Other(String),
}

impl TodoFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Other(value) => value.as_str(),
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
            Self::All | Self::Other(_) => true,
        }
    }
}

impl From<&str> for TodoFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "active" => Self::Active,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TodoFilter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<TodoFilter> for String {
    fn from(value: TodoFilter) -> Self {
        match value {
            TodoFilter::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}
