//! Task list search, sort and status counts.
//!
//! # Invariants
//! - A blank (whitespace-only) query matches every task.
//! - Sorting is stable: equal keys keep their input order.

use crate::model::sort::SortBy;
use crate::model::todo::{Todo, TodoFilter};
use std::cmp::Ordering;

/// View options for the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    /// Case-insensitive substring matched against task text.
    pub text: String,
    pub sort_by: SortBy,
}

impl TodoQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sort_by: SortBy::default(),
        }
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

/// Filters `todos` by the query text and orders them by its sort key.
pub fn view_todos<'a, I>(todos: I, query: &TodoQuery) -> Vec<&'a Todo>
where
    I: IntoIterator<Item = &'a Todo>,
{
    let mut result: Vec<&Todo> = if query.text.trim().is_empty() {
        todos.into_iter().collect()
    } else {
        let needle = query.text.to_lowercase();
        todos
            .into_iter()
            .filter(|todo| todo.text.to_lowercase().contains(&needle))
            .collect()
    };

    result.sort_by(|a, b| compare(a, b, query.sort_by));
    result
}

/// Number of tasks in `todos` matching `status`; unknown statuses count 0.
pub fn count_tasks(todos: &[&Todo], status: &TodoFilter) -> usize {
    match status {
        TodoFilter::Other(_) => 0,
        known => todos.iter().filter(|todo| known.matches(todo)).count(),
    }
}

fn compare(a: &Todo, b: &Todo, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Newest => b.created_at.cmp(&a.created_at),
        SortBy::Oldest => a.created_at.cmp(&b.created_at),
        SortBy::Alphabetical => a
            .text
            .to_lowercase()
            .cmp(&b.text.to_lowercase())
            .then_with(|| a.text.cmp(&b.text)),
        SortBy::Priority => b
            .priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.created_at.cmp(&a.created_at)),
        SortBy::DueDate => match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
