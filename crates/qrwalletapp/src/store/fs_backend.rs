use super::backend::{backup_file_name, StorageBackend, BACKUP_EXT, BACKUP_PREFIX};
use crate::error::{Result, WalletError};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

pub const RECORDS_FILE: &str = "qr_codes.json";
pub const MARKER_FILE: &str = "app_version.json";

/// Filesystem backend rooted at one app-private data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WalletError::Io)?;
        }
        Ok(())
    }

    fn read_optional(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.root.join(file_name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WalletError::Io(e)),
        }
    }

    fn write_atomic(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.ensure_dir()?;

        let target = self.root.join(file_name);
        let tmp = self.root.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(WalletError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(WalletError::Io(e));
        }

        debug!(path = %target.display(), bytes = bytes.len(), "wrote file");
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_records(&self) -> Result<Option<Vec<u8>>> {
        self.read_optional(RECORDS_FILE)
    }

    fn write_records(&self, bytes: &[u8]) -> Result<()> {
        self.write_atomic(RECORDS_FILE, bytes)
    }

    fn read_marker(&self) -> Result<Option<Vec<u8>>> {
        self.read_optional(MARKER_FILE)
    }

    fn write_marker(&self, bytes: &[u8]) -> Result<()> {
        self.write_atomic(MARKER_FILE, bytes)
    }

    fn backup_records(&self, stamp: DateTime<Utc>) -> Result<PathBuf> {
        let source = self.records_path();
        if !source.exists() {
            return Err(WalletError::Store(format!(
                "No records file to back up at {}",
                source.display()
            )));
        }

        // Two quarantines within the same millisecond must not overwrite each other.
        let mut attempt = 0;
        let target = loop {
            let candidate = self.root.join(backup_file_name(stamp, attempt));
            if !candidate.exists() {
                break candidate;
            }
            attempt += 1;
        };

        fs::copy(&source, &target).map_err(WalletError::Io)?;
        Ok(target)
    }

    fn list_backups(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(WalletError::Io)? {
            let path = entry.map_err(WalletError::Io)?.path();
            let is_backup = path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| {
                    name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXT)
                });
            if is_backup && path.is_file() {
                backups.push(path);
            }
        }
        backups.sort();
        Ok(backups)
    }

    fn records_path(&self) -> PathBuf {
        self.root.join(RECORDS_FILE)
    }

    fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }
}
