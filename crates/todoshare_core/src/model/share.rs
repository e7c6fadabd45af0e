//! Share records and the fabricated `todoShare://` link scheme.
//!
//! # Invariants
//! - A record is valid iff `now < expires_at`.
//! - `link == SHARE_LINK_PREFIX + id` for records built by `ShareRecord::new`.
//! - Share ids are `<base36 millis>-<6 base36 chars>`; uniqueness is
//!   probabilistic, not guaranteed.

use crate::model::null_as_default;
use crate::model::todo::TodoId;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use rand::Rng;

/// Prefix of every generated share link.
pub const SHARE_LINK_PREFIX: &str = "todoShare://share/";
/// Lifetime of a share link when the caller does not choose one.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

const SHARE_ID_SUFFIX_LEN: usize = 6;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static SHARE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-z]+-[0-9a-z]+$").expect("valid share id regex"));
static SHARE_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^todoShare://share/([0-9a-z]+-[0-9a-z]+)$").expect("valid share link regex")
});

/// Access level granted by a share link.
///
/// Stored values outside `view|edit` are preserved as `Other`; they never
/// satisfy an `edit` check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SharePermission {
    #[default]
    View,
    Edit,
    Other(String),
}

impl SharePermission {
    pub fn as_str(&self) -> &str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl Display for SharePermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SharePermission {
    fn from(value: &str) -> Self {
        match value {
            "view" => Self::View,
            "edit" => Self::Edit,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SharePermission {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SharePermission> for String {
    fn from(value: SharePermission) -> Self {
        match value {
            SharePermission::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Options accepted when creating a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    pub permission: SharePermission,
    /// Whole days until expiry; `0` yields a link that is already expired.
    pub expiry_days: i64,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            permission: SharePermission::View,
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }
}

impl ShareOptions {
    pub fn with_permission(mut self, permission: SharePermission) -> Self {
        self.permission = permission;
        self
    }

    pub fn with_expiry_days(mut self, expiry_days: i64) -> Self {
        self.expiry_days = expiry_days;
        self
    }
}

/// Persisted share link for one task.
///
/// `todo_id` is a weak reference: removing the task leaves the record behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    pub id: String,
    pub todo_id: TodoId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permission: SharePermission,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub link: String,
}

impl ShareRecord {
    /// Builds a record with a freshly generated id.
    ///
    /// Returns `None` when `expiry_days` puts the expiry outside the
    /// representable date range.
    pub fn new(todo_id: TodoId, options: &ShareOptions, now: DateTime<Utc>) -> Option<Self> {
        let expires_at = shift_by_days(now, options.expiry_days)?;
        let id = generate_share_id(now);
        Some(Self {
            link: share_link(&id),
            id,
            todo_id,
            permission: options.permission.clone(),
            created_at: now,
            expires_at,
        })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_valid_at(now)
    }
}

/// `instant + days`, or `None` on overflow.
pub fn shift_by_days(instant: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|delta| instant.checked_add_signed(delta))
}

/// Generates `<base36(now millis)>-<6 random base36 chars>`.
pub fn generate_share_id(now: DateTime<Utc>) -> String {
    let millis = u128::try_from(now.timestamp_millis()).unwrap_or(0);
    let mut rng = rand::rng();
    let suffix: String = (0..SHARE_ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36_DIGITS[rng.random_range(0..BASE36_DIGITS.len())]))
        .collect();
    format!("{}-{suffix}", to_base36(millis))
}

/// Builds the link for a share id.
pub fn share_link(share_id: &str) -> String {
    format!("{SHARE_LINK_PREFIX}{share_id}")
}

/// Extracts the share id from a `todoShare://share/<id>` link.
pub fn parse_share_link(link: &str) -> Option<&str> {
    SHARE_LINK_RE
        .captures(link.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns whether `value` has the shape of a generated share id.
pub fn is_share_id(value: &str) -> bool {
    SHARE_ID_RE.is_match(value)
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{
        generate_share_id, is_share_id, parse_share_link, share_link, shift_by_days, to_base36,
        ShareOptions, SharePermission, ShareRecord,
    };
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn share_id_has_timestamp_prefix_and_six_char_suffix() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = generate_share_id(now);
        let (prefix, suffix) = id.split_once('-').unwrap();
        assert_eq!(prefix, "loyw3v28");
        assert_eq!(suffix.len(), 6);
        assert!(is_share_id(&id));
    }

    #[test]
    fn parse_share_link_only_accepts_scheme_links() {
        let link = share_link("loyw3v28-abc123");
        assert_eq!(parse_share_link(&link), Some("loyw3v28-abc123"));
        assert_eq!(parse_share_link("https://share/loyw3v28-abc123"), None);
        assert_eq!(parse_share_link("todoShare://share/"), None);
    }

    #[test]
    fn record_expires_exactly_at_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record =
            ShareRecord::new(7, &ShareOptions::default().with_expiry_days(0), now).unwrap();
        assert!(record.is_expired_at(now));

        let week = ShareRecord::new(7, &ShareOptions::default(), now).unwrap();
        assert_eq!(week.expires_at, now + Duration::days(7));
        assert!(week.is_valid_at(now + Duration::days(7) - Duration::milliseconds(1)));
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let huge = ShareOptions::default().with_expiry_days(200_000_000);
        assert!(ShareRecord::new(7, &huge, now).is_none());
        assert!(shift_by_days(now, i64::MAX).is_none());
        assert!(shift_by_days(now, -200_000_000).is_none());
        assert_eq!(shift_by_days(now, 3), Some(now + Duration::days(3)));
    }

    #[test]
    fn null_permission_reads_as_view() {
        let record: ShareRecord = serde_json::from_value(serde_json::json!({
            "id": "loyw3v28-abc123",
            "todoId": 4,
            "permission": null,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "expiresAt": "2024-01-08T00:00:00.000Z",
            "link": "todoShare://share/loyw3v28-abc123"
        }))
        .unwrap();
        assert_eq!(record.permission, SharePermission::View);
    }

    #[test]
    fn unknown_permission_round_trips() {
        let json = serde_json::to_value(SharePermission::from("admin")).unwrap();
        assert_eq!(json, "admin");
        let back: SharePermission = serde_json::from_value(json).unwrap();
        assert_eq!(back, SharePermission::Other("admin".to_string()));
    }
}
