//! Persistence layer over a flat key-value store.
//!
//! # Responsibility
//! - Model browser-style `localStorage` as the `KeyValueStore` trait.
//! - Keep JSON encoding of each `todoShare_*` key inside this layer.
//!
//! # Invariants
//! - Every write replaces the whole value under its key; there are no
//!   partial or indexed updates.
//! - Repository APIs return typed errors; swallowing is the caller's policy.

pub mod keys;
pub mod kv_repo;
pub mod local_storage;
pub mod share_repo;
pub mod snapshot_repo;
