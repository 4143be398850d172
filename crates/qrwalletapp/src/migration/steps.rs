//! Version-indexed migration steps.
//!
//! A step tagged `version: N` upgrades data written by schema `N - 1` to
//! schema `N`. The gate runs every step with `stored < N <= running`, in order.

use crate::error::{Result, WalletError};
use crate::model::{default_name, QrRecord};
use crate::store::codec;
use crate::store::record_store::fresh_id;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a step did to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationAction {
    /// No records file existed; an empty one was written.
    CreatedEmpty,
    /// The records file parsed and was left alone.
    Validated,
    /// The records file did not parse; it was copied to `backup` and reset.
    Quarantined { backup: PathBuf },
    /// The records file could not be read; it was reset to empty. `backup` is
    /// set when a copy could still be taken.
    ResetUnreadable { backup: Option<PathBuf> },
    /// Entries missing an id, name or timestamp were completed, clashing ids
    /// were reissued and repeated contents dropped.
    AdoptedLegacy {
        adopted: usize,
        dropped_duplicates: usize,
    },
    /// Nothing to do for this step.
    Unchanged,
}

pub struct StepContext {
    pub now: DateTime<Utc>,
    pub pretty_json: bool,
}

pub struct MigrationStep {
    pub version: u32,
    pub description: &'static str,
    pub run: fn(&dyn StorageBackend, &StepContext) -> Result<MigrationAction>,
}

pub static STEPS: &[MigrationStep] = &[
    MigrationStep {
        version: 1,
        description: "ensure records file is valid",
        run: ensure_records_valid,
    },
    MigrationStep {
        version: 2,
        description: "adopt legacy entries",
        run: adopt_legacy_entries,
    },
];

/// Steps needed to go from `stored` to `running`, in execution order.
pub fn pending(stored: u32, running: u32) -> impl Iterator<Item = &'static MigrationStep> {
    STEPS
        .iter()
        .filter(move |step| step.version > stored && step.version <= running)
}

/// Any entry shape ever written to the records file.
/// Canonical records parse as well, with every field present.
#[derive(Debug, Deserialize)]
struct LegacyEntry {
    #[serde(default)]
    id: Option<String>,
    content: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "createdAt")]
    timestamp: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyFile {
    Document {
        #[serde(default)]
        codes: Vec<LegacyEntry>,
    },
    Bare(Vec<LegacyEntry>),
}

fn decode_lenient(bytes: &[u8]) -> serde_json::Result<Vec<LegacyEntry>> {
    Ok(match serde_json::from_slice(bytes)? {
        LegacyFile::Document { codes } => codes,
        LegacyFile::Bare(codes) => codes,
    })
}

fn write_empty(backend: &dyn StorageBackend, ctx: &StepContext) -> Result<()> {
    backend.write_records(&codec::encode(&[], ctx.pretty_json)?)
}

fn quarantine(
    backend: &dyn StorageBackend,
    ctx: &StepContext,
    reason: &str,
) -> Result<MigrationAction> {
    let backup = backend.backup_records(ctx.now)?;
    write_empty(backend, ctx)?;
    warn!(
        path = %backend.records_path().display(),
        backup = %backup.display(),
        reason,
        "records file is corrupted, backed up and reset"
    );
    Ok(MigrationAction::Quarantined { backup })
}

/// Only the reset write may fail the step; the backup is best effort.
fn reset_unreadable(
    backend: &dyn StorageBackend,
    ctx: &StepContext,
    error: &WalletError,
) -> Result<MigrationAction> {
    let backup = match backend.backup_records(ctx.now) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(error = %e, "could not back up unreadable records file");
            None
        }
    };
    write_empty(backend, ctx)?;
    warn!(
        path = %backend.records_path().display(),
        error = %error,
        "records file is unreadable, reset to empty"
    );
    Ok(MigrationAction::ResetUnreadable { backup })
}

fn ensure_records_valid(
    backend: &dyn StorageBackend,
    ctx: &StepContext,
) -> Result<MigrationAction> {
    let bytes = match backend.read_records() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            write_empty(backend, ctx)?;
            info!("created empty records file for new installation");
            return Ok(MigrationAction::CreatedEmpty);
        }
        Err(e) => return reset_unreadable(backend, ctx, &e),
    };

    match decode_lenient(&bytes) {
        Ok(_) => Ok(MigrationAction::Validated),
        Err(e) => quarantine(backend, ctx, &e.to_string()),
    }
}

fn adopt_legacy_entries(
    backend: &dyn StorageBackend,
    ctx: &StepContext,
) -> Result<MigrationAction> {
    let bytes = match backend.read_records() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Ok(MigrationAction::Unchanged),
        Err(e) => return reset_unreadable(backend, ctx, &e),
    };
    if codec::decode(&bytes).is_ok_and(|records| is_consistent(&records)) {
        return Ok(MigrationAction::Unchanged);
    }

    let entries = match decode_lenient(&bytes) {
        Ok(entries) => entries,
        Err(e) => return quarantine(backend, ctx, &e.to_string()),
    };

    let mut records: Vec<QrRecord> = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    let mut adopted = 0;
    let mut dropped_duplicates = 0;

    for entry in entries {
        if !seen.insert(entry.content.clone()) {
            dropped_duplicates += 1;
            continue;
        }
        let mut changed =
            entry.id.is_none() || entry.name.is_none() || entry.timestamp.is_none();

        let id = match entry.id {
            Some(id) if !id.is_empty() && !records.iter().any(|r| r.id == id) => id,
            Some(_) => {
                changed = true;
                fresh_id(&records)
            }
            None => fresh_id(&records),
        };
        if changed {
            adopted += 1;
        }
        let name = entry.name.unwrap_or_else(|| default_name(records.len()));
        let created_at = entry
            .timestamp
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(ctx.now);

        records.push(QrRecord {
            id,
            content: entry.content,
            name,
            created_at,
        });
    }

    backend.write_records(&codec::encode(&records, ctx.pretty_json)?)?;
    info!(adopted, dropped_duplicates, "adopted legacy records");
    Ok(MigrationAction::AdoptedLegacy {
        adopted,
        dropped_duplicates,
    })
}

/// Non-empty ids, no repeated id and no repeated content.
fn is_consistent(records: &[QrRecord]) -> bool {
    let mut ids = HashSet::new();
    let mut contents = HashSet::new();
    records.iter().all(|r| {
        !r.id.is_empty() && ids.insert(r.id.as_str()) && contents.insert(r.content.as_str())
    })
}
