//! # Record References: Id vs Display Index
//!
//! Records carry an opaque id, which is the only thing the store understands.
//! Ids are unpleasant to type, so user-facing surfaces also number records by
//! their position in the ordered sequence, starting at 1.
//!
//! ## Dual Identifiers
//!
//! 1. **Id (Internal)**: Immutable and unique. Survives reorders and renames.
//! 2. **Display Index (External)**: `position + 1` in the current sequence.
//!    Moves when the sequence is reordered or an earlier record is deleted.
//!
//! ## Selector Grammar
//!
//! - **Index**: `N` (e.g. `1`, `12`). Zero is invalid.
//! - **Range**: `A-B` (e.g. `2-4`), inclusive, `A <= B`.
//! - **Id**: anything else is taken verbatim as a record id.
//!
//! Index selectors must land inside the wallet; id selectors are passed through
//! untouched, so an unknown id reaches the store and is a no-op there.
//!
//! **Developer Note**: build listings with [`index_records`] rather than
//! enumerating by hand, so indexes agree everywhere.

use crate::model::QrRecord;
use serde::Serialize;

/// A record paired with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub index: usize,
    pub record: QrRecord,
}

pub fn index_records(records: &[QrRecord]) -> Vec<DisplayRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            index: i + 1,
            record: record.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordSelector {
    Index(usize),
    Range(usize, usize),
    Id(String),
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSelector::Index(i) => write!(f, "{}", i),
            RecordSelector::Range(a, b) => write!(f, "{}-{}", a, b),
            RecordSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

fn parse_position(s: &str) -> Option<Result<usize, String>> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match s.parse::<usize>() {
        Ok(0) => Err("Indexes start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Invalid index '{}': {}", s, e)),
    })
}

pub fn parse_selector(s: &str) -> Result<RecordSelector, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Empty selector".to_string());
    }

    if let Some(position) = parse_position(s) {
        return position.map(RecordSelector::Index);
    }

    // "2-4" is a range only when both sides are plain numbers; ids may contain '-'.
    if let Some((start, end)) = s.split_once('-') {
        if let (Some(start), Some(end)) = (parse_position(start), parse_position(end)) {
            let (start, end) = (start?, end?);
            if start > end {
                return Err(format!("Invalid range {}: start is after end", s));
            }
            return Ok(RecordSelector::Range(start, end));
        }
    }

    Ok(RecordSelector::Id(s.to_string()))
}
