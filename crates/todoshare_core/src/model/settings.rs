//! Persisted user preferences (`todoShare_settings`).

use crate::model::sort::SortBy;
use crate::model::todo::Priority;
use serde::{Deserialize, Serialize};

/// User-level configuration. Missing fields read as their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: String,
    pub sort_by: SortBy,
    pub show_completed: bool,
    pub default_priority: Priority,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            sort_by: SortBy::Newest,
            show_completed: true,
            default_priority: Priority::Medium,
            notifications: true,
        }
    }
}
