use crate::commands::{CmdMessage, CmdResult, StatusReport};
use crate::error::Result;
use crate::migration::read_marker;
use crate::model::QrRecord;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &RecordStore<B>, current: &[QrRecord]) -> Result<CmdResult> {
    let backend = store.backend();
    let marker = read_marker(backend);
    let backups = backend.list_backups()?;

    let mut result = CmdResult::default();
    if !backups.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} unreadable records file(s) were set aside",
            backups.len()
        )));
    }

    result.status = Some(StatusReport {
        schema_version: marker.as_ref().map_or(0, |m| m.schema_version),
        version_name: marker
            .as_ref()
            .map(|m| m.version_name.clone())
            .unwrap_or_default(),
        last_migrated_at: marker.map(|m| m.last_migrated_at),
        record_count: current.len(),
        records_path: backend.records_path(),
        marker_path: backend.marker_path(),
        backups,
    });
    Ok(result)
}
