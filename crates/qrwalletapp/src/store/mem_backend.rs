use super::backend::{backup_file_name, StorageBackend};
use crate::error::{Result, WalletError};
use chrono::{DateTime, Utc};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

const VIRTUAL_ROOT: &str = "/memory";

/// In-memory storage backend for testing.
///
/// Uses `Mutex` rather than `RefCell` so a wallet built on it can be shared
/// across threads through `SharedWallet`.
#[derive(Default)]
pub struct MemBackend {
    records: Mutex<Option<Vec<u8>>>,
    marker: Mutex<Option<Vec<u8>>>,
    backups: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the records file with raw bytes (valid or not).
    pub fn with_records(self, bytes: impl Into<Vec<u8>>) -> Self {
        *lock(&self.records) = Some(bytes.into());
        self
    }

    pub fn with_marker(self, bytes: impl Into<Vec<u8>>) -> Self {
        *lock(&self.marker) = Some(bytes.into());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Make the records file unreadable until the next successful
    /// `write_records` replaces it.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    pub fn records_bytes(&self) -> Option<Vec<u8>> {
        lock(&self.records).clone()
    }

    pub fn marker_bytes(&self) -> Option<Vec<u8>> {
        lock(&self.marker).clone()
    }

    /// Backups taken so far, with their contents.
    pub fn backups(&self) -> Vec<(PathBuf, Vec<u8>)> {
        lock(&self.backups).clone()
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(WalletError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }

    fn check_readable(&self) -> Result<()> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(WalletError::Io(io::Error::other("Simulated read error")));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn read_records(&self) -> Result<Option<Vec<u8>>> {
        self.check_readable()?;
        Ok(self.records_bytes())
    }

    fn write_records(&self, bytes: &[u8]) -> Result<()> {
        self.check_writable()?;
        *lock(&self.records) = Some(bytes.to_vec());
        self.simulate_read_error.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn read_marker(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.marker_bytes())
    }

    fn write_marker(&self, bytes: &[u8]) -> Result<()> {
        self.check_writable()?;
        *lock(&self.marker) = Some(bytes.to_vec());
        Ok(())
    }

    fn backup_records(&self, stamp: DateTime<Utc>) -> Result<PathBuf> {
        self.check_writable()?;
        self.check_readable()?;
        let current = self
            .records_bytes()
            .ok_or_else(|| WalletError::Store("No records file to back up".to_string()))?;

        let mut backups = lock(&self.backups);
        let mut attempt = 0;
        let path = loop {
            let candidate = PathBuf::from(VIRTUAL_ROOT).join(backup_file_name(stamp, attempt));
            if !backups.iter().any(|(p, _)| *p == candidate) {
                break candidate;
            }
            attempt += 1;
        };
        backups.push((path.clone(), current));
        Ok(path)
    }

    fn list_backups(&self) -> Result<Vec<PathBuf>> {
        Ok(lock(&self.backups).iter().map(|(p, _)| p.clone()).collect())
    }

    fn records_path(&self) -> PathBuf {
        PathBuf::from(VIRTUAL_ROOT).join("qr_codes.json")
    }

    fn marker_path(&self) -> PathBuf {
        PathBuf::from(VIRTUAL_ROOT).join("app_version.json")
    }
}
