use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::index_records;
use crate::model::QrRecord;

/// List records in stored order, optionally narrowed by a case-insensitive
/// match on name or content. Indexes always refer to the full sequence.
pub fn run(current: &[QrRecord], filter: Option<&str>) -> Result<CmdResult> {
    let mut listed = index_records(current);
    if let Some(term) = filter.map(str::to_lowercase).filter(|t| !t.is_empty()) {
        listed.retain(|d| {
            d.record.name.to_lowercase().contains(&term)
                || d.record.content.to_lowercase().contains(&term)
        });
    }
    Ok(CmdResult::default().with_listed_records(listed))
}
