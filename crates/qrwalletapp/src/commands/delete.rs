use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RecordSelector;
use crate::model::QrRecord;
use crate::store::{RecordStore, StorageBackend};
use std::collections::HashSet;

use super::helpers::{display_records_for, resolve_selectors};

/// Delete every selected record in one write.
///
/// Affected records carry the index they had *before* the delete.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    current: &[QrRecord],
    selectors: &[RecordSelector],
) -> Result<CmdResult> {
    let ids = resolve_selectors(current, selectors)?;
    let affected = display_records_for(current, &ids);

    let doomed: HashSet<String> = ids.into_iter().collect();
    let next = store.delete_by_ids(&doomed, current)?;

    let mut result = CmdResult::default();
    for shown in &affected {
        result.add_message(CmdMessage::success(format!(
            "Deleted {}: {}",
            shown.index, shown.record.name
        )));
    }
    if affected.is_empty() {
        result.add_message(CmdMessage::info("Nothing to delete"));
    }

    Ok(result.with_affected_records(affected).with_snapshot(next))
}
