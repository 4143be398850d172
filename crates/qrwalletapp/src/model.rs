//! # Domain Model
//!
//! Two persisted types live here: [`QrRecord`], one stored QR code, and
//! [`VersionMarker`], the process-wide schema marker read by the migration gate.
//!
//! ## Record Identity
//!
//! - `id`: opaque string, assigned once at creation. Fresh ids are UUID v4, but
//!   older data may carry other shapes (e.g. `qr_1700000000000_4821`), so the
//!   type stays a plain `String`.
//! - `content`: the decoded QR payload. Never edited; unique across a wallet.
//! - `name`: user-facing label, the only mutable field.
//! - `created_at`: stamped at insert time with millisecond precision, because
//!   the on-disk format stores integer milliseconds and must round-trip exactly.
//!
//! ## On-Disk Field Names
//!
//! ```text
//! { "id": "...", "content": "...", "name": "...", "timestamp": 1700000000000 }
//! ```
//!
//! `createdAt` is accepted as an alias for `timestamp`. Unknown fields are ignored.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this build. Bumped whenever a migration step is added.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const DEFAULT_NAME_PREFIX: &str = "QR Code";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRecord {
    pub id: String,
    pub content: String,
    pub name: String,
    #[serde(
        rename = "timestamp",
        alias = "createdAt",
        with = "chrono::serde::ts_milliseconds"
    )]
    pub created_at: DateTime<Utc>,
}

impl QrRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            name: name.into(),
            created_at: now_millis(),
        }
    }
}

/// Default label for a record appended to a wallet that currently holds `existing` codes.
///
/// Numbering follows the current count, not a persisted counter, so after
/// deletions a new default name may repeat an existing one. Names are not
/// required to be unique.
pub fn default_name(existing: usize) -> String {
    format!("{} {}", DEFAULT_NAME_PREFIX, existing + 1)
}

/// Current wall-clock time truncated to what the records file can represent.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// The version of the running application, compared against the stored marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppVersion {
    pub code: u32,
    pub name: String,
}

impl AppVersion {
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    pub fn current() -> Self {
        Self::new(CURRENT_SCHEMA_VERSION, env!("CARGO_PKG_VERSION"))
    }
}

/// Persisted record of the last successful migration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMarker {
    #[serde(rename = "versionCode", default)]
    pub schema_version: u32,
    /// Informational only; never compared.
    #[serde(rename = "versionName", default)]
    pub version_name: String,
    /// The Unix epoch when an older marker never recorded it.
    #[serde(
        rename = "lastMigrated",
        with = "chrono::serde::ts_milliseconds",
        default
    )]
    pub last_migrated_at: DateTime<Utc>,
}

impl VersionMarker {
    pub fn stamped(version: &AppVersion) -> Self {
        Self {
            schema_version: version.code,
            version_name: version.name.clone(),
            last_migrated_at: now_millis(),
        }
    }
}
