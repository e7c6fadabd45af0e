//! Domain model for tasks, share records, shared lists and user settings.
//!
//! # Responsibility
//! - Define the records persisted under the `todoShare_*` storage keys.
//! - Keep the JSON wire shape (camelCase field names) stable across releases.
//!
//! # Invariants
//! - Task ids are assigned by the Task Store only; model constructors never
//!   invent ids.
//! - Share record validity is a pure function of `expires_at` and "now".

pub mod settings;
pub mod share;
pub mod shared_list;
pub mod sort;
pub mod state;
pub mod todo;

use serde::{Deserialize, Deserializer};

/// Reads `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
