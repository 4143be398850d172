use crate::error::{Result, WalletError};
use crate::index::{DisplayRecord, RecordSelector};
use crate::model::QrRecord;
use std::collections::HashSet;

fn id_at(records: &[QrRecord], index: usize) -> Result<String> {
    index
        .checked_sub(1)
        .and_then(|pos| records.get(pos))
        .map(|r| r.id.clone())
        .ok_or(WalletError::IndexNotFound(index))
}

/// Turn selectors into record ids, in selector order, without duplicates.
///
/// Display indexes and ranges must address existing records. Ids are passed
/// through even if nothing holds them; the store treats those as no-ops.
pub fn resolve_selectors(
    records: &[QrRecord],
    selectors: &[RecordSelector],
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    let mut push = |id: String| {
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    };

    for selector in selectors {
        match selector {
            RecordSelector::Index(index) => push(id_at(records, *index)?),
            RecordSelector::Range(start, end) => {
                for index in *start..=*end {
                    push(id_at(records, index)?);
                }
            }
            RecordSelector::Id(id) => push(id.clone()),
        }
    }

    Ok(ids)
}

/// Resolve a selector that must name exactly one record.
pub fn resolve_single(records: &[QrRecord], selector: &RecordSelector) -> Result<String> {
    if let RecordSelector::Range(start, end) = selector {
        if start != end {
            return Err(WalletError::InvalidSelector(format!(
                "{} selects more than one code",
                selector
            )));
        }
    }
    let mut ids = resolve_selectors(records, std::slice::from_ref(selector))?;
    ids.pop()
        .ok_or_else(|| WalletError::InvalidSelector(selector.to_string()))
}

/// Indexed views of the records holding `ids`, in `ids` order. Unknown ids are skipped.
pub fn display_records_for(records: &[QrRecord], ids: &[String]) -> Vec<DisplayRecord> {
    ids.iter()
        .filter_map(|id| {
            records
                .iter()
                .position(|r| &r.id == id)
                .map(|pos| DisplayRecord {
                    index: pos + 1,
                    record: records[pos].clone(),
                })
        })
        .collect()
}
