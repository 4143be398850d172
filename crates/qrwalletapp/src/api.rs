//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every UI (the CLI today).
//!
//! ## Role and Responsibilities
//!
//! - **Owns the snapshot**: the in-memory ordered sequence the UI renders.
//! - **Normalizes inputs**: parses selector strings, turns 1-based positions
//!   into the store's 0-based ones.
//! - **Dispatches** to `commands::*` and adopts the sequence they return.
//!
//! ## Snapshot Discipline
//!
//! A mutation hands the current snapshot to the store, which computes and
//! saves the next sequence. The snapshot is replaced wholesale only when that
//! save succeeded. On failure the error is returned and the snapshot is left
//! as it was, so memory never runs ahead of disk.
//!
//! ## Concurrency
//!
//! Mutations take `&mut self`, so within one owner they cannot interleave.
//! Callers that share a wallet across threads use [`SharedWallet`], which puts
//! the whole load-modify-save cycle under one write lock.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `WalletApi<FsBackend>`
//! - Testing: `WalletApi<MemBackend>`

use crate::collab::ScanOutcome;
use crate::commands::{self, CmdResult};
use crate::error::{Result, WalletError};
use crate::index::{parse_selector, RecordSelector};
use crate::model::QrRecord;
use crate::store::{RecordStore, StorageBackend};
use std::sync::{Arc, RwLock};

pub struct WalletApi<B: StorageBackend> {
    store: RecordStore<B>,
    records: Vec<QrRecord>,
    render_size: u32,
}

impl<B: StorageBackend> WalletApi<B> {
    /// Load the snapshot from `store`. Run the migration gate before this.
    pub fn open(store: RecordStore<B>, render_size: u32) -> Result<Self> {
        let records = store.load()?;
        Ok(Self {
            store,
            records,
            render_size,
        })
    }

    pub fn records(&self) -> &[QrRecord] {
        &self.records
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn add(&mut self, content: &str) -> Result<CmdResult> {
        let result = commands::add::run(&self.store, &self.records, content)?;
        Ok(self.adopt(result))
    }

    pub fn add_scanned(&mut self, outcome: ScanOutcome) -> Result<CmdResult> {
        let result = commands::add::from_scan(&self.store, &self.records, outcome)?;
        Ok(self.adopt(result))
    }

    pub fn rename(&mut self, selector: &str, new_name: &str) -> Result<CmdResult> {
        let selector = parse_one(selector)?;
        let result = commands::rename::run(&self.store, &self.records, &selector, new_name)?;
        Ok(self.adopt(result))
    }

    pub fn delete_records<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let result = commands::delete::run(&self.store, &self.records, &selectors)?;
        Ok(self.adopt(result))
    }

    /// Move the record at 1-based position `from` to 1-based position `to`.
    pub fn move_record(&mut self, from: usize, to: usize) -> Result<CmdResult> {
        let result = commands::reorder::run(&self.store, &self.records, from, to)?;
        Ok(self.adopt(result))
    }

    pub fn list(&self, filter: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.records, filter)
    }

    pub fn show<I: AsRef<str>>(&self, selectors: &[I], size: Option<u32>) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::show::run(&self.records, &selectors, size.unwrap_or(self.render_size))
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.store, &self.records)
    }

    /// Only commands whose save succeeded carry a snapshot.
    fn adopt(&mut self, result: CmdResult) -> CmdResult {
        if let Some(next) = &result.snapshot {
            self.records = next.clone();
        }
        result
    }
}

fn parse_one(input: &str) -> Result<RecordSelector> {
    parse_selector(input).map_err(WalletError::InvalidSelector)
}

/// Parse selector strings, dropping exact repeats while keeping first-seen order.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RecordSelector>> {
    let mut selectors: Vec<RecordSelector> = Vec::new();
    for input in inputs {
        let selector = parse_one(input.as_ref())?;
        if !selectors.contains(&selector) {
            selectors.push(selector);
        }
    }
    Ok(selectors)
}

/// A wallet shared across threads.
///
/// Reads share the lock; every mutation holds it exclusively for the whole
/// load-modify-save cycle.
pub struct SharedWallet<B: StorageBackend> {
    inner: Arc<RwLock<WalletApi<B>>>,
}

impl<B: StorageBackend> Clone for SharedWallet<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: StorageBackend> SharedWallet<B> {
    pub fn new(api: WalletApi<B>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(api)),
        }
    }

    pub fn snapshot(&self) -> Result<Vec<QrRecord>> {
        let api = self
            .inner
            .read()
            .map_err(|_| WalletError::Store("wallet lock poisoned".to_string()))?;
        Ok(api.records().to_vec())
    }

    pub fn read<T>(&self, f: impl FnOnce(&WalletApi<B>) -> Result<T>) -> Result<T> {
        let api = self
            .inner
            .read()
            .map_err(|_| WalletError::Store("wallet lock poisoned".to_string()))?;
        f(&api)
    }

    pub fn mutate<T>(&self, f: impl FnOnce(&mut WalletApi<B>) -> Result<T>) -> Result<T> {
        let mut api = self
            .inner
            .write()
            .map_err(|_| WalletError::Store("wallet lock poisoned".to_string()))?;
        f(&mut api)
    }
}
