//! # Command Layer
//!
//! This module contains the **business logic** of the wallet. Each command lives
//! in its own submodule and is a plain function over the current snapshot and a
//! [`RecordStore`](crate::store::RecordStore).
//!
//! ## Role and Responsibilities
//!
//! - Resolve user-facing selectors into record ids
//! - Call the store, which owns every write
//! - Return a structured [`CmdResult`]
//!
//! Commands never print, never prompt and never exit. They also never keep
//! state: the caller passes in the snapshot it holds, and a mutating command
//! hands back the new sequence in [`CmdResult::snapshot`] for the caller to adopt.
//!
//! ## Testing Strategy
//!
//! Command tests run against `MemBackend` and check `CmdResult` contents and
//! what ended up persisted.
//!
//! ## Command Modules
//!
//! - [`add`]: Store scanned or typed content (deduplicated)
//! - [`rename`]: Change a record's name
//! - [`delete`]: Remove one or more records
//! - [`reorder`]: Move a record to another position
//! - [`list`]: Indexed listing
//! - [`show`]: Build render requests
//! - [`status`]: Marker, counts, backups and paths
//! - [`helpers`]: Selector resolution

use crate::collab::RenderRequest;
use crate::index::DisplayRecord;
use crate::model::QrRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod rename;
pub mod reorder;
pub mod show;
pub mod status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Storage health as reported by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Schema version in the marker; 0 when none was written.
    pub schema_version: u32,
    pub version_name: String,
    pub last_migrated_at: Option<DateTime<Utc>>,
    pub record_count: usize,
    pub records_path: PathBuf,
    pub marker_path: PathBuf,
    pub backups: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<DisplayRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub render_requests: Vec<RenderRequest>,
    pub status: Option<StatusReport>,
    pub messages: Vec<CmdMessage>,
    /// The full sequence after a successful write. `None` when nothing changed.
    pub snapshot: Option<Vec<QrRecord>>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_snapshot(mut self, records: Vec<QrRecord>) -> Self {
        self.snapshot = Some(records);
        self
    }
}
