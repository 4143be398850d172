use crate::collab::ScanOutcome;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WalletError};
use crate::index::DisplayRecord;
use crate::model::QrRecord;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    current: &[QrRecord],
    content: &str,
) -> Result<CmdResult> {
    if content.is_empty() {
        return Err(WalletError::EmptyContent);
    }

    let record = store.add_by_content(content, current)?;
    let mut result = CmdResult::default();

    // The store's answer is authoritative; reconcile against it by id.
    if let Some(pos) = current.iter().position(|r| r.id == record.id) {
        result.add_message(CmdMessage::info(format!(
            "Already stored as {}: {}",
            pos + 1,
            record.name
        )));
        result.affected_records.push(DisplayRecord {
            index: pos + 1,
            record,
        });
        return Ok(result);
    }

    let mut next = current.to_vec();
    next.push(record.clone());
    result.add_message(CmdMessage::success(format!(
        "Added {}: {}",
        next.len(),
        record.name
    )));
    result.affected_records.push(DisplayRecord {
        index: next.len(),
        record,
    });
    Ok(result.with_snapshot(next))
}

/// React to a scanner result. A scan that produced nothing changes nothing.
pub fn from_scan<B: StorageBackend>(
    store: &RecordStore<B>,
    current: &[QrRecord],
    outcome: ScanOutcome,
) -> Result<CmdResult> {
    match outcome {
        ScanOutcome::Decoded(content) => run(store, current, &content),
        ScanOutcome::NoResult => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("Nothing scanned"));
            Ok(result)
        }
    }
}
