//! Core domain logic for TodoShare.
//! This crate is the single source of truth for task and share invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::settings::Settings;
pub use model::share::{
    parse_share_link, ShareOptions, SharePermission, ShareRecord, DEFAULT_EXPIRY_DAYS,
    SHARE_LINK_PREFIX,
};
pub use model::shared_list::SharedList;
pub use model::sort::{SharedListSort, SortBy};
pub use model::state::{StoredTodoState, TodoState};
pub use model::todo::{Priority, Todo, TodoFilter, TodoId, TodoPatch};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::share_repo::{KvShareRepository, ShareRepository};
pub use repo::snapshot_repo::{KvSnapshotRepository, TodoSnapshotRepository};
pub use search::shared_list_search::view_shared_lists;
pub use search::todo_search::{count_tasks, view_todos, TodoQuery};
pub use service::share_registry::{ShareError, ShareRegistry};
pub use service::todo_store::{reduce, TodoAction, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
