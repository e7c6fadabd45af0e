//! Core use-case services.
//!
//! # Responsibility
//! - `TodoStore`: reducer-driven task state with whole-state persistence.
//! - `ShareRegistry`: share-link lifecycle over the share repository.
//!
//! # Invariants
//! - The two services share no in-memory state; they are coupled only by
//!   the task id stored in a share record.
//! - Storage failures never escape a service method.

pub mod share_registry;
pub mod todo_store;
