//! Whole-state snapshot persistence for the Task Store.
//!
//! The store only sees `TodoSnapshotRepository`; swapping the whole-document
//! rewrite for incremental persistence means adding another implementation.

use crate::model::state::{StoredTodoState, TodoState};
use crate::repo::keys::TODOS_KEY;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};

/// Load/save contract for the Task Store snapshot.
pub trait TodoSnapshotRepository {
    /// Returns `None` when nothing has been saved yet.
    fn load_snapshot(&self) -> RepoResult<Option<StoredTodoState>>;
    fn save_snapshot(&self, state: &TodoState) -> RepoResult<()>;
}

impl<R: TodoSnapshotRepository + ?Sized> TodoSnapshotRepository for &R {
    fn load_snapshot(&self) -> RepoResult<Option<StoredTodoState>> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&self, state: &TodoState) -> RepoResult<()> {
        (**self).save_snapshot(state)
    }
}

/// Snapshot repository writing JSON under `todoShare_todos`.
pub struct KvSnapshotRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvSnapshotRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> TodoSnapshotRepository for KvSnapshotRepository<S> {
    fn load_snapshot(&self) -> RepoResult<Option<StoredTodoState>> {
        let Some(raw) = self.store.get_item(TODOS_KEY)? else {
            return Ok(None);
        };
        // Non-object payloads (e.g. a bare array) carry no todos.
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if !value.is_object() {
            return Ok(Some(StoredTodoState::default()));
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    fn save_snapshot(&self, state: &TodoState) -> RepoResult<()> {
        let encoded = serde_json::to_string(state)?;
        self.store.set_item(TODOS_KEY, &encoded)
    }
}
