use crate::collab::RenderRequest;
use crate::commands::CmdResult;
use crate::config::WalletConfig;
use crate::error::Result;
use crate::index::RecordSelector;
use crate::model::QrRecord;

use super::helpers::{display_records_for, resolve_selectors};

/// Build one render request per selected record. Nothing is written.
pub fn run(current: &[QrRecord], selectors: &[RecordSelector], size: u32) -> Result<CmdResult> {
    let size = WalletConfig::checked_render_size(size)?;
    let ids = resolve_selectors(current, selectors)?;
    let shown = display_records_for(current, &ids);

    let mut result = CmdResult::default();
    result.render_requests = shown
        .iter()
        .map(|d| RenderRequest {
            record_id: d.record.id.clone(),
            name: d.record.name.clone(),
            content: d.record.content.clone(),
            size,
        })
        .collect();
    Ok(result.with_listed_records(shown))
}
