//! Share Registry: share-link lifecycle (create, validate, update, revoke,
//! extend, cleanup).
//!
//! # Responsibility
//! - Create share records with generated ids and `todoShare://` links.
//! - Answer validity and permission questions against stored records.
//!
//! # Invariants
//! - Every operation reads the whole share collection and, when mutating,
//!   rewrites it whole.
//! - Expiry is pull-based: expired records stay stored until validation of
//!   that id or an explicit `cleanup_expired_shares` removes them.
//! - Storage failures are logged and turned into `None`/`false`/empty
//!   results; they never surface as errors.
//! - A collection that cannot be read is never rewritten; mutations are
//!   skipped instead of replacing stored records with an empty list.

use crate::clock::{Clock, SystemClock};
use crate::model::share::{shift_by_days, ShareOptions, SharePermission, ShareRecord};
use crate::model::todo::{Todo, TodoId};
use crate::repo::share_repo::ShareRepository;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-facing validation error for share operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// No task, or a task without a usable (non-zero) id.
    InvalidTodo,
    /// Expiry lands outside the representable date range.
    ExpiryOutOfRange(i64),
}

impl Display for ShareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTodo => write!(f, "invalid todo object provided"),
            Self::ExpiryOutOfRange(days) => {
                write!(f, "expiry of {days} days is out of range")
            }
        }
    }
}

impl Error for ShareError {}

/// Share-link registry over a `ShareRepository`.
pub struct ShareRegistry<R: ShareRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: ShareRepository> ShareRegistry<R, SystemClock> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: ShareRepository, C: Clock> ShareRegistry<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Creates and stores a share record for `todo_id`.
    ///
    /// The record is returned even if persisting it failed.
    ///
    /// # Errors
    /// - `ShareError::ExpiryOutOfRange` when `options.expiry_days` overflows
    ///   the date range; nothing is stored.
    pub fn create_share_link(
        &self,
        todo_id: TodoId,
        options: &ShareOptions,
    ) -> Result<ShareRecord, ShareError> {
        let record = ShareRecord::new(todo_id, options, self.clock.now())
            .ok_or(ShareError::ExpiryOutOfRange(options.expiry_days))?;
        self.save_share(&record);
        info!(
            "event=share_create module=share status=ok todo_id={todo_id} share_id={} permission={} expiry_days={}",
            record.id, record.permission, options.expiry_days
        );
        Ok(record)
    }

    /// Creates a share for `todo` and returns only its link.
    ///
    /// # Errors
    /// - `ShareError::InvalidTodo` when `todo` is absent or its id is `0`.
    /// - `ShareError::ExpiryOutOfRange` as for `create_share_link`.
    pub fn generate_share_link(
        &self,
        todo: Option<&Todo>,
        options: &ShareOptions,
    ) -> Result<String, ShareError> {
        let todo = todo
            .filter(|todo| todo.id != 0)
            .ok_or(ShareError::InvalidTodo)?;
        Ok(self.create_share_link(todo.id, options)?.link)
    }

    /// Returns the record if it exists and has not expired.
    ///
    /// An expired record is deleted as a side effect of this read.
    pub fn validate_share_link(&self, share_id: &str) -> Option<ShareRecord> {
        let record = self.load_share(share_id)?;

        if record.is_expired_at(self.clock.now()) {
            debug!("event=share_validate module=share status=expired share_id={share_id}");
            self.remove_share(share_id);
            return None;
        }

        Some(record)
    }

    /// Replaces the stored permission. Returns `false` if the id is unknown.
    ///
    /// Expiry is not checked and the value is stored as given.
    pub fn update_share_permissions(
        &self,
        share_id: &str,
        permission: impl Into<SharePermission>,
    ) -> bool {
        let Some(mut record) = self.load_share(share_id) else {
            return false;
        };
        record.permission = permission.into();
        self.save_share(&record);
        true
    }

    /// Deletes the record.
    ///
    /// Reports success for unknown ids too; `false` only means the
    /// collection could not be read or rewritten.
    pub fn revoke_access(&self, share_id: &str) -> bool {
        let removed = self.remove_share(share_id);
        info!("event=share_revoke module=share status=ok share_id={share_id} removed={removed}");
        removed
    }

    /// Pushes `expires_at` back by `additional_days` (relative to the
    /// current expiry, not to now). Negative values shorten the link.
    ///
    /// Returns `None` for an unknown id, and also leaves the record untouched
    /// when the new expiry would overflow the date range.
    pub fn extend_share_expiry(&self, share_id: &str, additional_days: i64) -> Option<ShareRecord> {
        let mut record = self.load_share(share_id)?;
        let Some(expires_at) = shift_by_days(record.expires_at, additional_days) else {
            warn!(
                "event=share_extend module=share status=error share_id={share_id} days={additional_days} error=out_of_range"
            );
            return None;
        };
        record.expires_at = expires_at;
        self.save_share(&record);
        Some(record)
    }

    /// `View` is satisfied by any existing record; anything else requires a
    /// stored `Edit`. Unknown ids never have permission.
    pub fn has_permission(&self, share_id: &str, required: &SharePermission) -> bool {
        let Some(record) = self.load_share(share_id) else {
            return false;
        };
        match required {
            SharePermission::View => true,
            _ => record.permission == SharePermission::Edit,
        }
    }

    /// Non-expired records pointing at `todo_id`.
    pub fn get_active_shares(&self, todo_id: TodoId) -> Vec<ShareRecord> {
        let now = self.clock.now();
        self.all_shares()
            .into_iter()
            .filter(|share| share.todo_id == todo_id && share.is_valid_at(now))
            .collect()
    }

    /// Purges every expired record in one rewrite; returns how many went.
    pub fn cleanup_expired_shares(&self) -> usize {
        let now = self.clock.now();
        let Some(shares) = self.read_for_rewrite("share_cleanup") else {
            return 0;
        };
        let before = shares.len();
        let valid: Vec<ShareRecord> = shares
            .into_iter()
            .filter(|share| share.is_valid_at(now))
            .collect();
        let purged = before - valid.len();

        match self.repo.replace_all(&valid) {
            Ok(()) => {
                info!("event=share_cleanup module=share status=ok purged={purged}");
                purged
            }
            Err(err) => {
                error!("event=share_cleanup module=share status=error error={err}");
                0
            }
        }
    }

    /// Every stored record, expired ones included.
    pub fn all_shares(&self) -> Vec<ShareRecord> {
        self.repo.all_shares().unwrap_or_else(|err| {
            warn!("event=share_load module=share status=error fallback=empty error={err}");
            Vec::new()
        })
    }

    fn load_share(&self, share_id: &str) -> Option<ShareRecord> {
        self.all_shares()
            .into_iter()
            .find(|share| share.id == share_id)
    }

    /// Current collection for a read-modify-write, or `None` if it cannot
    /// be read.
    fn read_for_rewrite(&self, event: &str) -> Option<Vec<ShareRecord>> {
        match self.repo.all_shares() {
            Ok(shares) => Some(shares),
            Err(err) => {
                error!("event={event} module=share status=error action=skip_rewrite error={err}");
                None
            }
        }
    }

    fn save_share(&self, record: &ShareRecord) {
        let Some(mut shares) = self.read_for_rewrite("share_save") else {
            return;
        };
        match shares.iter_mut().find(|share| share.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => shares.push(record.clone()),
        }

        if let Err(err) = self.repo.replace_all(&shares) {
            error!(
                "event=share_save module=share status=error share_id={} error={err}",
                record.id
            );
        }
    }

    fn remove_share(&self, share_id: &str) -> bool {
        let Some(mut shares) = self.read_for_rewrite("share_remove") else {
            return false;
        };
        shares.retain(|share| share.id != share_id);

        match self.repo.replace_all(&shares) {
            Ok(()) => true,
            Err(err) => {
                error!("event=share_remove module=share status=error share_id={share_id} error={err}");
                false
            }
        }
    }
}
