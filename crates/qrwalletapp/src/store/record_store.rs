use super::backend::StorageBackend;
use super::codec;
use crate::error::{Result, WalletError};
use crate::model::{default_name, QrRecord};
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Owner of the durable record sequence.
///
/// Every mutation follows the same shape: take the caller's current sequence,
/// compute the new sequence, `save` it, return it. Nothing is cached here; the
/// caller's snapshot is the input and the returned value is the new truth.
pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) so the migration gate and status can reach it.
    pub(crate) backend: B,
    pretty_json: bool,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pretty_json: true,
        }
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the ordered sequence from disk.
    ///
    /// A missing file is a first run and yields an empty sequence. An
    /// unparseable file also yields an empty sequence: quarantining it is the
    /// migration gate's job, which runs before the first load.
    pub fn load(&self) -> Result<Vec<QrRecord>> {
        let Some(bytes) = self.backend.read_records()? else {
            return Ok(Vec::new());
        };
        match codec::decode(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    path = %self.backend.records_path().display(),
                    error = %e,
                    "records file is unreadable, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the records file with `records`. The single write path.
    pub fn save(&self, records: &[QrRecord]) -> Result<()> {
        let bytes = codec::encode(records, self.pretty_json)?;
        self.backend.write_records(&bytes)?;
        debug!(count = records.len(), "saved records");
        Ok(())
    }

    /// Add `content`, or return the record that already holds it.
    ///
    /// When the content is new, the returned record has been appended and
    /// persisted; callers reconcile their snapshot against it.
    pub fn add_by_content(&self, content: &str, current: &[QrRecord]) -> Result<QrRecord> {
        if let Some(existing) = find_by_content(current, content) {
            debug!(id = %existing.id, "content already stored");
            return Ok(existing.clone());
        }

        let record = QrRecord::new(fresh_id(current), content, default_name(current.len()));
        let mut next = current.to_vec();
        next.push(record.clone());
        self.save(&next)?;
        Ok(record)
    }

    pub fn rename_by_id(
        &self,
        id: &str,
        new_name: &str,
        current: &[QrRecord],
    ) -> Result<Vec<QrRecord>> {
        let next = plan_rename(id, new_name, current);
        self.save(&next)?;
        Ok(next)
    }

    pub fn delete_by_ids(
        &self,
        ids: &HashSet<String>,
        current: &[QrRecord],
    ) -> Result<Vec<QrRecord>> {
        let next = plan_delete(ids, current);
        self.save(&next)?;
        Ok(next)
    }

    pub fn reorder(&self, from: usize, to: usize, current: &[QrRecord]) -> Result<Vec<QrRecord>> {
        let next = plan_reorder(from, to, current)?;
        self.save(&next)?;
        Ok(next)
    }
}

/// Byte-exact, case-sensitive content lookup.
pub fn find_by_content<'a>(records: &'a [QrRecord], content: &str) -> Option<&'a QrRecord> {
    records.iter().find(|r| r.content == content)
}

/// A UUID v4 not already used in `records`.
pub fn fresh_id(records: &[QrRecord]) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !records.iter().any(|r| r.id == candidate) {
            return candidate;
        }
    }
}

/// `records` with the name of `id` replaced. Unknown ids leave it unchanged.
pub fn plan_rename(id: &str, new_name: &str, records: &[QrRecord]) -> Vec<QrRecord> {
    records
        .iter()
        .map(|r| {
            if r.id == id {
                QrRecord {
                    name: new_name.to_string(),
                    ..r.clone()
                }
            } else {
                r.clone()
            }
        })
        .collect()
}

/// `records` without any id in `ids`, survivors in their original order.
pub fn plan_delete(ids: &HashSet<String>, records: &[QrRecord]) -> Vec<QrRecord> {
    records
        .iter()
        .filter(|r| !ids.contains(&r.id))
        .cloned()
        .collect()
}

/// Move the element at `from` so it ends up at `to`.
///
/// Removal happens first, then insertion at `to` in the shortened sequence.
/// Both indices must address the original sequence.
pub fn plan_reorder(from: usize, to: usize, records: &[QrRecord]) -> Result<Vec<QrRecord>> {
    let len = records.len();
    if from >= len || to >= len {
        return Err(WalletError::InvalidIndex { from, to, len });
    }

    let mut next = records.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn store() -> RecordStore<MemBackend> {
        RecordStore::new(MemBackend::new())
    }

    fn sample(names: &[&str]) -> Vec<QrRecord> {
        names
            .iter()
            .map(|n| QrRecord::new(format!("id-{}", n), format!("content-{}", n), *n))
            .collect()
    }

    fn ids(records: &[QrRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn load_missing_file_is_empty() {
        assert!(store().load().unwrap().is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let store = RecordStore::new(MemBackend::new().with_records(vec![0xde, 0xad, 0xbe, 0xef]));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_order_and_fields() {
        let store = store();
        let mut records = sample(&["c", "a", "b"]);
        records[1].name = "Boarding pass".into();

        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn save_failure_is_reported() {
        let store = store();
        store.backend().set_simulate_write_error(true);
        assert!(store.save(&sample(&["a"])).is_err());
    }

    #[test]
    fn add_scenario_numbers_and_dedups() {
        let store = store();

        let first = store.add_by_content("https://a.example", &[]).unwrap();
        assert_eq!(first.name, "QR Code 1");
        assert_eq!(first.content, "https://a.example");
        let list = vec![first.clone()];

        let second = store.add_by_content("https://b.example", &list).unwrap();
        assert_eq!(second.name, "QR Code 2");
        let list = vec![first.clone(), second.clone()];
        assert_eq!(store.load().unwrap(), list);

        let again = store.add_by_content("https://a.example", &list).unwrap();
        assert_eq!(again, first);
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn add_existing_content_does_not_write() {
        let store = store();
        let existing = sample(&["a"]);
        store.backend().set_simulate_write_error(true);

        // No write is attempted, so the simulated failure never surfaces.
        let found = store.add_by_content("content-a", &existing).unwrap();
        assert_eq!(found, existing[0]);
        assert!(store.backend().records_bytes().is_none());
    }

    #[test]
    fn add_is_idempotent_when_fed_back() {
        let store = store();
        let first = store.add_by_content("WIFI:S:home;T:WPA;P:secret;;", &[]).unwrap();
        let list = vec![first.clone()];
        let second = store.add_by_content("WIFI:S:home;T:WPA;P:secret;;", &list).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn add_matches_content_case_sensitively() {
        let store = store();
        let first = store.add_by_content("ABC", &[]).unwrap();
        let second = store.add_by_content("abc", &[first.clone()]).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn add_failure_surfaces_and_keeps_disk() {
        let store = store();
        let list = sample(&["a"]);
        store.save(&list).unwrap();

        store.backend().set_simulate_write_error(true);
        assert!(store.add_by_content("new", &list).is_err());
        assert_eq!(store.load().unwrap(), list);
    }

    #[test]
    fn default_names_can_repeat_after_delete() {
        let store = store();
        let a = store.add_by_content("a", &[]).unwrap();
        let b = store.add_by_content("b", &[a.clone()]).unwrap();
        let remaining = store
            .delete_by_ids(&HashSet::from([a.id.clone()]), &[a, b.clone()])
            .unwrap();

        let c = store.add_by_content("c", &remaining).unwrap();
        assert_eq!(b.name, "QR Code 2");
        assert_eq!(c.name, "QR Code 2");
        assert_ne!(b.id, c.id);
    }

    #[test]
    fn rename_changes_only_the_name() {
        let store = store();
        let records = sample(&["a", "b", "c"]);
        let renamed = store.rename_by_id("id-b", "Library card", &records).unwrap();

        assert_eq!(ids(&renamed), ids(&records));
        assert_eq!(renamed[1].name, "Library card");
        assert_eq!(renamed[1].content, records[1].content);
        assert_eq!(renamed[1].created_at, records[1].created_at);
        assert_eq!(renamed[0], records[0]);
        assert_eq!(renamed[2], records[2]);
        assert_eq!(store.load().unwrap(), renamed);
    }

    #[test]
    fn rename_unknown_id_is_noop() {
        let records = sample(&["a", "b"]);
        assert_eq!(plan_rename("missing", "x", &records), records);
    }

    #[test]
    fn delete_keeps_survivor_order() {
        let store = store();
        let records = sample(&["a", "b", "c", "d", "e"]);
        let doomed = HashSet::from(["id-b".to_string(), "id-d".to_string(), "id-zz".to_string()]);

        let survivors = store.delete_by_ids(&doomed, &records).unwrap();
        assert_eq!(ids(&survivors), vec!["id-a", "id-c", "id-e"]);
        assert_eq!(store.load().unwrap(), survivors);
    }

    #[test]
    fn reorder_scenario() {
        let records = sample(&["A", "B", "C"]);
        let moved = plan_reorder(0, 2, &records).unwrap();
        assert_eq!(ids(&moved), vec!["id-B", "id-C", "id-A"]);

        let back = plan_reorder(2, 0, &moved).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn reorder_is_a_permutation() {
        let records = sample(&["a", "b", "c", "d"]);
        for from in 0..records.len() {
            for to in 0..records.len() {
                let moved = plan_reorder(from, to, &records).unwrap();
                assert_eq!(moved.len(), records.len());
                assert_eq!(moved[to], records[from]);

                let mut before = ids(&records);
                let mut after = ids(&moved);
                before.sort();
                after.sort();
                assert_eq!(before, after);

                for (pos, record) in moved.iter().enumerate() {
                    let original = records.iter().position(|r| r == record).unwrap();
                    assert!(original.abs_diff(pos) <= 1 || original == from);
                }
            }
        }
    }

    #[test]
    fn reorder_rejects_out_of_range() {
        let store = store();
        let records = sample(&["a", "b"]);
        store.save(&records).unwrap();

        match store.reorder(0, 2, &records) {
            Err(WalletError::InvalidIndex { from, to, len }) => {
                assert_eq!((from, to, len), (0, 2, 2));
            }
            other => panic!("Expected InvalidIndex, got {:?}", other),
        }
        assert!(plan_reorder(0, 0, &[]).is_err());
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn fresh_id_avoids_existing() {
        let records = sample(&["a"]);
        let id = fresh_id(&records);
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, records[0].id);
    }
}
