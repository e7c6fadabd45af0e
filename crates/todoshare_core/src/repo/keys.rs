//! Fixed storage keys.

/// Whole Task Store snapshot.
pub const TODOS_KEY: &str = "todoShare_todos";
/// Independent shared-list save path, not wired to the store's own field.
pub const SHARED_LISTS_KEY: &str = "todoShare_sharedLists";
pub const SETTINGS_KEY: &str = "todoShare_settings";
/// Share Registry records.
pub const SHARES_KEY: &str = "todoShare_shares";

/// Every key owned by this application, in removal order for a full clear.
pub const ALL_KEYS: [&str; 4] = [TODOS_KEY, SHARED_LISTS_KEY, SETTINGS_KEY, SHARES_KEY];
