//! Whole-state snapshot of the Task Store (`todoShare_todos`).
//!
//! # Invariants
//! - `next_id` only grows through store transitions.
//! - Rehydration recomputes a missing or zero `next_id` as `max(id) + 1`.

use crate::model::shared_list::SharedList;
use crate::model::todo::{Todo, TodoFilter, TodoId};
use serde::{Deserialize, Serialize};

/// Full reducer state, persisted as one JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub shared_lists: Vec<SharedList>,
    pub filter: TodoFilter,
    pub next_id: TodoId,
}

impl Default for TodoState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            shared_lists: Vec::new(),
            filter: TodoFilter::All,
            next_id: 1,
        }
    }
}

impl TodoState {
    /// Rebuilds state from a saved payload.
    ///
    /// Returns the initial state when the payload carries no `todos` field.
    pub fn rehydrate(saved: StoredTodoState) -> Self {
        let Some(todos) = saved.todos else {
            return Self::default();
        };

        let next_id = match saved.next_id {
            Some(next_id) if next_id != 0 => next_id,
            _ => max_id(&todos).saturating_add(1),
        };

        Self {
            todos,
            shared_lists: saved.shared_lists.unwrap_or_default(),
            filter: saved.filter.unwrap_or_default(),
            next_id,
        }
    }
}

/// Lenient read-side shape of a saved snapshot; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredTodoState {
    pub todos: Option<Vec<Todo>>,
    pub shared_lists: Option<Vec<SharedList>>,
    pub filter: Option<TodoFilter>,
    pub next_id: Option<TodoId>,
}

fn max_id(todos: &[Todo]) -> TodoId {
    todos.iter().map(|todo| todo.id).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{StoredTodoState, TodoState};
    use crate::model::todo::{Priority, Todo};
    use chrono::Utc;

    #[test]
    fn rehydrate_recomputes_missing_next_id() {
        let saved = StoredTodoState {
            todos: Some(vec![
                Todo::new(4, "a", Priority::Low, None, Utc::now()),
                Todo::new(9, "b", Priority::Low, None, Utc::now()),
            ]),
            ..StoredTodoState::default()
        };
        assert_eq!(TodoState::rehydrate(saved).next_id, 10);
    }

    #[test]
    fn rehydrate_without_todos_is_initial_state() {
        let saved = StoredTodoState {
            next_id: Some(42),
            ..StoredTodoState::default()
        };
        assert_eq!(TodoState::rehydrate(saved), TodoState::default());
    }

    #[test]
    fn rehydrate_saturates_at_max_id() {
        let saved = StoredTodoState {
            todos: Some(vec![Todo::new(i64::MAX, "edge", Priority::Low, None, Utc::now())]),
            ..StoredTodoState::default()
        };
        assert_eq!(TodoState::rehydrate(saved).next_id, i64::MAX);
    }

    #[test]
    fn rehydrate_of_empty_list_starts_at_one() {
        let saved = StoredTodoState {
            todos: Some(Vec::new()),
            next_id: Some(0),
            ..StoredTodoState::default()
        };
        assert_eq!(TodoState::rehydrate(saved).next_id, 1);
    }
}
