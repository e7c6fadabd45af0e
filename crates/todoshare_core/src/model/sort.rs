//! Sort keys for task and shared-list views.

use serde::{Deserialize, Serialize};

/// Ordering applied to the task list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
    Priority,
    DueDate,
}

impl SortBy {
    /// Parses a sort key; anything unrecognised falls back to `Newest`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "oldest" => Self::Oldest,
            "alphabetical" => Self::Alphabetical,
            "priority" => Self::Priority,
            "dueDate" | "due_date" | "due-date" => Self::DueDate,
            _ => Self::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
        }
    }
}

/// Ordering applied to the shared-lists view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SharedListSort {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
}

impl SharedListSort {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "oldest" => Self::Oldest,
            "alphabetical" => Self::Alphabetical,
            _ => Self::Newest,
        }
    }
}
