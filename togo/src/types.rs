//! Record types for the Togo stores.
//!
//! This module defines the on-disk schema shared by the to-do store and the
//! identity ledger. All types serialize to camelCase JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a registered author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(Uuid);

impl IdentityId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Unique identifier of a to-do record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A registered local author.
///
/// At most one identity in a ledger is active at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: IdentityId,

    /// Login name. Logging in with a known name targets this identity.
    pub name: String,

    /// Password hash supplied by the caller; never the plaintext.
    pub password_hash: String,

    /// Whether this identity holds the current session.
    pub is_active: bool,
}

impl Identity {
    /// Creates a new, active identity.
    #[must_use]
    pub fn new(name: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: IdentityId::new(),
            name: name.into(),
            password_hash: password_hash.into(),
            is_active: true,
        }
    }
}

/// Lifecycle state of a to-do record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Doing,
    Done,
    Delete,
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// A single to-do item.
///
/// Records are soft-deleted: `status == Delete` exactly when `deleted_at` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: TodoId,

    pub title: String,

    /// Reserved for item bodies; always empty for now.
    #[serde(default)]
    pub content: String,

    pub status: TodoStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,

    /// Author that was active when the item was added, if any.
    pub owner_identity: Option<IdentityId>,
}

impl TodoRecord {
    /// Creates a `doing` record stamped with the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, owner: Option<IdentityId>) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new(),
            title: title.into(),
            content: String::new(),
            status: TodoStatus::Doing,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            owner_identity: owner,
        }
    }

    /// Marks the record as completed.
    pub fn mark_done(&mut self) {
        self.status = TodoStatus::Done;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the record and stamps the deletion time.
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.status = TodoStatus::Delete;
        self.updated_at = now;
        self.deleted_at = Some(now);
    }

    /// Returns `true` if the record was added under `context`.
    ///
    /// A `None` context only matches records added while nobody was logged in.
    #[must_use]
    pub fn belongs_to(&self, context: Option<&IdentityId>) -> bool {
        self.owner_identity.as_ref() == context
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.status == TodoStatus::Delete
    }

    /// Returns `true` if the record takes a display index under `context`.
    #[must_use]
    pub fn is_visible_in(&self, context: Option<&IdentityId>) -> bool {
        self.belongs_to(context) && !self.is_deleted()
    }
}
