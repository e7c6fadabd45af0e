//! Fail-safe helpers for the settings, shared-list and housekeeping keys.
//!
//! # Responsibility
//! - Read/write typed payloads under the fixed `todoShare_*` keys.
//! - Absorb every storage failure: log it and return a safe fallback.
//!
//! # Invariants
//! - No function in this module returns an error or panics.
//! - Reads of missing or corrupt payloads yield defaults, never partial data.

use crate::model::settings::Settings;
use crate::model::shared_list::SharedList;
use crate::repo::keys::{ALL_KEYS, SETTINGS_KEY, SHARED_LISTS_KEY};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

const STORAGE_PROBE_KEY: &str = "__storage_test__";

/// Saves shared lists under the standalone shared-lists key.
///
/// Returns whether the write landed.
pub fn save_shared_lists(store: &impl KeyValueStore, lists: &[SharedList]) -> bool {
    save_json(store, SHARED_LISTS_KEY, lists)
}

/// Loads shared lists; missing or unreadable data yields an empty list.
pub fn load_shared_lists(store: &impl KeyValueStore) -> Vec<SharedList> {
    load_json(store, SHARED_LISTS_KEY).unwrap_or_default()
}

pub fn save_settings(store: &impl KeyValueStore, settings: &Settings) -> bool {
    save_json(store, SETTINGS_KEY, settings)
}

/// Loads user settings, falling back to `Settings::default()`.
pub fn load_settings(store: &impl KeyValueStore) -> Settings {
    load_json(store, SETTINGS_KEY).unwrap_or_default()
}

/// Removes every application key, share records included.
///
/// Keeps going after a failed key; returns whether all removals succeeded.
pub fn clear_all_data(store: &impl KeyValueStore) -> bool {
    let mut all_ok = true;
    for key in ALL_KEYS {
        if let Err(err) = store.remove_item(key) {
            error!("event=storage_clear module=storage status=error key={key} error={err}");
            all_ok = false;
        }
    }
    all_ok
}

/// Probes the store with a write followed by a remove.
pub fn is_storage_available(store: &impl KeyValueStore) -> bool {
    let probe = || -> RepoResult<()> {
        store.set_item(STORAGE_PROBE_KEY, STORAGE_PROBE_KEY)?;
        store.remove_item(STORAGE_PROBE_KEY)
    };
    probe().is_ok()
}

fn save_json<T: Serialize + ?Sized>(store: &impl KeyValueStore, key: &str, value: &T) -> bool {
    let write = || -> RepoResult<()> {
        let encoded = serde_json::to_string(value)?;
        store.set_item(key, &encoded)
    };
    match write() {
        Ok(()) => true,
        Err(err) => {
            error!("event=storage_save module=storage status=error key={key} error={err}");
            false
        }
    }
}

fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let read = || -> RepoResult<Option<T>> {
        match store.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    };
    match read() {
        Ok(value) => value,
        Err(err) => {
            warn!("event=storage_load module=storage status=error key={key} error={err}");
            None
        }
    }
}
