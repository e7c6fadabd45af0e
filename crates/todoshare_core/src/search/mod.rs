//! In-memory search and ordering for list views.
//!
//! # Responsibility
//! - Apply the text search and sort key chosen in a list view.
//! - Never mutate or persist; results borrow from the caller's data.

pub mod shared_list_search;
pub mod todo_search;
