use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WalletError};
use crate::index::DisplayRecord;
use crate::model::QrRecord;
use crate::store::{RecordStore, StorageBackend};

/// Move the record shown at display index `from` to display index `to`.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    current: &[QrRecord],
    from: usize,
    to: usize,
) -> Result<CmdResult> {
    let (Some(from_pos), Some(to_pos)) = (from.checked_sub(1), to.checked_sub(1)) else {
        return Err(WalletError::InvalidSelector(
            "Positions start at 1".to_string(),
        ));
    };

    let next = store.reorder(from_pos, to_pos, current)?;
    let moved = next[to_pos].clone();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved {} from {} to {}",
        moved.name, from, to
    )));
    result.affected_records.push(DisplayRecord {
        index: to,
        record: moved,
    });
    Ok(result.with_snapshot(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;

    fn seeded() -> (RecordStore<MemBackend>, Vec<QrRecord>) {
        let store = RecordStore::new(MemBackend::new());
        let records = vec![
            QrRecord::new("A", "a", "A"),
            QrRecord::new("B", "b", "B"),
            QrRecord::new("C", "c", "C"),
        ];
        store.save(&records).unwrap();
        (store, records)
    }

    #[test]
    fn moves_first_to_last() {
        let (store, records) = seeded();
        let result = run(&store, &records, 1, 3).unwrap();

        let next = result.snapshot.unwrap();
        let ids: Vec<&str> = next.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
        assert_eq!(result.affected_records[0].index, 3);
        assert_eq!(store.load().unwrap(), next);
    }

    #[test]
    fn zero_position_is_rejected() {
        let (store, records) = seeded();
        assert!(matches!(
            run(&store, &records, 0, 1),
            Err(WalletError::InvalidSelector(_))
        ));
    }

    #[test]
    fn out_of_range_is_rejected_without_write() {
        let (store, records) = seeded();
        store.backend().set_simulate_write_error(true);
        assert!(matches!(
            run(&store, &records, 1, 4),
            Err(WalletError::InvalidIndex { from: 0, to: 3, len: 3 })
        ));
    }
}
