use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore and the migration gate handle the "what".
///
/// Payloads are raw bytes: a corrupt records file may not even be valid UTF-8,
/// and backups must preserve it exactly.
pub trait StorageBackend {
    // --- Records File ---

    /// Read the records file.
    /// Returns Ok(None) if the file does not exist (first run).
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_records(&self) -> Result<Option<Vec<u8>>>;

    /// Overwrite the records file.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_records(&self, bytes: &[u8]) -> Result<()>;

    // --- Version Marker ---

    fn read_marker(&self) -> Result<Option<Vec<u8>>>;

    fn write_marker(&self, bytes: &[u8]) -> Result<()>;

    // --- Quarantine ---

    /// Copy the current records file, byte for byte, to a backup whose name
    /// carries `stamp`. Backups are never read back automatically.
    fn backup_records(&self, stamp: DateTime<Utc>) -> Result<PathBuf>;

    /// All backups created so far, oldest first.
    fn list_backups(&self) -> Result<Vec<PathBuf>>;

    // --- Paths ---

    /// Location of the records file. For MemBackend, a virtual path.
    fn records_path(&self) -> PathBuf;

    fn marker_path(&self) -> PathBuf;
}

pub(crate) const BACKUP_PREFIX: &str = "qr_codes_backup_";
pub(crate) const BACKUP_EXT: &str = ".json";

/// `qr_codes_backup_<millis>.json`, then `_1`, `_2`... for later backups
/// taken within the same millisecond.
pub(crate) fn backup_file_name(stamp: DateTime<Utc>, attempt: usize) -> String {
    if attempt == 0 {
        format!("{}{}{}", BACKUP_PREFIX, stamp.timestamp_millis(), BACKUP_EXT)
    } else {
        format!(
            "{}{}_{}{}",
            BACKUP_PREFIX,
            stamp.timestamp_millis(),
            attempt,
            BACKUP_EXT
        )
    }
}

/// Lets a borrowed backend drive a store, e.g. while a migration gate holds it.
impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn read_records(&self) -> Result<Option<Vec<u8>>> {
        (**self).read_records()
    }

    fn write_records(&self, bytes: &[u8]) -> Result<()> {
        (**self).write_records(bytes)
    }

    fn read_marker(&self) -> Result<Option<Vec<u8>>> {
        (**self).read_marker()
    }

    fn write_marker(&self, bytes: &[u8]) -> Result<()> {
        (**self).write_marker(bytes)
    }

    fn backup_records(&self, stamp: DateTime<Utc>) -> Result<PathBuf> {
        (**self).backup_records(stamp)
    }

    fn list_backups(&self) -> Result<Vec<PathBuf>> {
        (**self).list_backups()
    }

    fn records_path(&self) -> PathBuf {
        (**self).records_path()
    }

    fn marker_path(&self) -> PathBuf {
        (**self).marker_path()
    }
}
