//! # Startup
//!
//! Opening a wallet is a two-phase affair:
//!
//! 1. **Migrate**: the [`MigrationGate`] runs to completion against the data
//!    directory. Corrupt records files are set aside and replaced here, before
//!    anything reads them.
//! 2. **Load**: only then is the [`RecordStore`] opened and the snapshot loaded
//!    into a [`WalletApi`].
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI's `--data-dir`), used as is.
//! 2. `QRWALLET_DATA` environment variable, primarily for tests to isolate state.
//! 3. The OS data directory via the `directories` crate
//!    (e.g. `~/.local/share/qrwallet` on Linux).
//!
//! ## Failure Policy
//!
//! A migration pass that fails to write is logged and startup continues: the
//! store's own loader treats an unreadable file as empty, and the gate will try
//! again on the next start because the marker was not advanced.

use crate::api::WalletApi;
use crate::config::WalletConfig;
use crate::error::{Result, WalletError};
use crate::migration::{MigrationGate, MigrationOutcome};
use crate::model::AppVersion;
use crate::store::{FsBackend, RecordStore};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DATA_ENV_VAR: &str = "QRWALLET_DATA";

pub struct WalletContext {
    pub api: WalletApi<FsBackend>,
    pub config: WalletConfig,
    /// `None` when the migration pass failed and startup carried on.
    pub migration: Option<MigrationOutcome>,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "qrwallet", "qrwallet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| WalletError::Store("Could not determine a data directory".to_string()))
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<WalletContext> {
    initialize_with_version(data_override, AppVersion::current())
}

/// Like [`initialize`], with an explicit running version.
pub fn initialize_with_version(
    data_override: Option<PathBuf>,
    running: AppVersion,
) -> Result<WalletContext> {
    let data_dir = resolve_data_dir(data_override)?;
    std::fs::create_dir_all(&data_dir)?;
    debug!(path = %data_dir.display(), "using data directory");

    let config = WalletConfig::load(&data_dir);
    let backend = FsBackend::new(&data_dir);

    let migration = {
        let mut gate = MigrationGate::new(&backend, running).with_pretty_json(config.pretty_json);
        match gate.run_if_needed() {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "migration failed, continuing with existing data");
                None
            }
        }
    };

    let store = RecordStore::new(backend).with_pretty_json(config.pretty_json);
    let api = WalletApi::open(store, config.render_size)?;

    Ok(WalletContext {
        api,
        config,
        migration,
        data_dir,
    })
}
