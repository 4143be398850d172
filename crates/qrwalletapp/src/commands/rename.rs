use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RecordSelector;
use crate::model::QrRecord;
use crate::store::{RecordStore, StorageBackend};

use super::helpers::{display_records_for, resolve_single};

pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    current: &[QrRecord],
    selector: &RecordSelector,
    new_name: &str,
) -> Result<CmdResult> {
    let id = resolve_single(current, selector)?;
    let next = store.rename_by_id(&id, new_name, current)?;

    let affected = display_records_for(&next, std::slice::from_ref(&id));
    let mut result = CmdResult::default();
    match affected.first() {
        Some(shown) => result.add_message(CmdMessage::success(format!(
            "Renamed {} to {}",
            shown.index, new_name
        ))),
        None => result.add_message(CmdMessage::warning(format!("No code with id {}", id))),
    }

    Ok(result.with_affected_records(affected).with_snapshot(next))
}
