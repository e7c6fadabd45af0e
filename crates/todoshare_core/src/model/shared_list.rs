//! Consumption-side view of a list someone shared with this user.
//!
//! Shared lists are supplied from outside the core; nothing here creates them.

use crate::model::todo::Todo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of tasks shown in a collapsed shared-list card.
pub const SHARED_LIST_PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedList {
    pub share_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub shared_by: String,
    pub shared_at: DateTime<Utc>,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl SharedList {
    pub fn task_count(&self) -> usize {
        self.todos.len()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    /// Completed share in `[0.0, 1.0]`; an empty list reports `0.0`.
    pub fn completion_ratio(&self) -> f64 {
        if self.todos.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.todos.len() as f64
    }

    /// First tasks shown in the collapsed card, plus how many are hidden.
    pub fn preview(&self) -> (&[Todo], usize) {
        let shown = self.todos.len().min(SHARED_LIST_PREVIEW_LEN);
        (&self.todos[..shown], self.todos.len() - shown)
    }
}
