//! Share record collection persisted under `todoShare_shares`.
//!
//! # Invariants
//! - The collection is always read and rewritten as a whole.
//! - Records are keyed by `id`; an upsert with an existing id replaces it.
//! - One malformed entry is skipped on read; it never hides the other records.

use crate::model::share::ShareRecord;
use crate::repo::keys::SHARES_KEY;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::warn;

/// Whole-collection access to share records.
pub trait ShareRepository {
    /// Returns every readable record; a missing key reads as empty.
    ///
    /// # Errors
    /// Fails when the store itself fails or the payload is not a JSON array.
    fn all_shares(&self) -> RepoResult<Vec<ShareRecord>>;
    fn replace_all(&self, shares: &[ShareRecord]) -> RepoResult<()>;
}

impl<R: ShareRepository + ?Sized> ShareRepository for &R {
    fn all_shares(&self) -> RepoResult<Vec<ShareRecord>> {
        (**self).all_shares()
    }

    fn replace_all(&self, shares: &[ShareRecord]) -> RepoResult<()> {
        (**self).replace_all(shares)
    }
}

/// JSON-array share repository over a key-value store.
pub struct KvShareRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvShareRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> ShareRepository for KvShareRepository<S> {
    fn all_shares(&self) -> RepoResult<Vec<ShareRecord>> {
        match self.store.get_item(SHARES_KEY)? {
            Some(raw) if !raw.is_empty() => {
                let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
                Ok(entries
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                        Ok(record) => Some(record),
                        Err(err) => {
                            warn!(
                                "event=share_load module=share status=skipped index={index} error={err}"
                            );
                            None
                        }
                    })
                    .collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn replace_all(&self, shares: &[ShareRecord]) -> RepoResult<()> {
        let encoded = serde_json::to_string(shares)?;
        self.store.set_item(SHARES_KEY, &encoded)
    }
}
