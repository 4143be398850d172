//! # Migration Gate
//!
//! Runs once per process, before the first [`RecordStore::load`], and makes
//! sure the records file on disk is something the store can trust.
//!
//! ## State Machine
//!
//! ```text
//! Unchecked ──run_if_needed()──▶ Checked(outcome)
//! ```
//!
//! The transition is one-way. Calling `run_if_needed` again returns the cached
//! outcome and touches nothing. If a pass fails with a write error the gate
//! stays `Unchecked` and may be retried.
//!
//! ## Decision
//!
//! The stored [`VersionMarker`] (version 0 when absent or unreadable) is
//! compared with the running [`AppVersion`]:
//!
//! - `stored == running`: nothing to do.
//! - `stored < running`: every step in [`steps::STEPS`] with
//!   `stored < step.version <= running` runs in order, then the marker is
//!   rewritten with the running version and the current time.
//! - `stored > running`: a downgrade. No files are changed and the marker is
//!   kept, so the newer build still sees its own version later.
//!
//! ## Failure Policy
//!
//! Read and parse failures are turned into recovery (backup, then reset to
//! an empty valid file). Only failures to *write* that recovery are returned
//! as errors.
//!
//! [`RecordStore::load`]: crate::store::RecordStore::load

use crate::error::{Result, WalletError};
use crate::model::{now_millis, AppVersion, VersionMarker};
use crate::store::StorageBackend;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

pub mod steps;

pub use steps::MigrationAction;
use steps::StepContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    UpToDate {
        version: u32,
    },
    Migrated {
        from: u32,
        to: u32,
        actions: Vec<MigrationAction>,
    },
    Downgrade {
        stored: u32,
        running: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Unchecked,
    Checked(MigrationOutcome),
}

pub struct MigrationGate<'a, B: StorageBackend> {
    backend: &'a B,
    running: AppVersion,
    pretty_json: bool,
    state: GateState,
}

/// Read the stored marker. Absent or unreadable markers yield `None`.
pub fn read_marker(backend: &dyn StorageBackend) -> Option<VersionMarker> {
    let bytes = match backend.read_marker() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "could not read version marker, assuming first run");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(marker) => Some(marker),
        Err(e) => {
            warn!(
                path = %backend.marker_path().display(),
                error = %e,
                "version marker is unreadable, assuming version 0"
            );
            None
        }
    }
}

impl<'a, B: StorageBackend> MigrationGate<'a, B> {
    pub fn new(backend: &'a B, running: AppVersion) -> Self {
        Self {
            backend,
            running,
            pretty_json: true,
            state: GateState::Unchecked,
        }
    }

    /// Formatting used for any records file the gate rewrites.
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.state, GateState::Checked(_))
    }

    pub fn run_if_needed(&mut self) -> Result<MigrationOutcome> {
        if let GateState::Checked(outcome) = &self.state {
            return Ok(outcome.clone());
        }

        let outcome = self.check()?;
        self.state = GateState::Checked(outcome.clone());
        Ok(outcome)
    }

    fn check(&self) -> Result<MigrationOutcome> {
        let stored = read_marker(self.backend).map_or(0, |m| m.schema_version);
        let running = self.running.code;

        match stored.cmp(&running) {
            Ordering::Equal => {
                debug!(version = running, "data is up to date");
                Ok(MigrationOutcome::UpToDate { version: running })
            }
            Ordering::Greater => {
                warn!(
                    stored,
                    running, "data was written by a newer version, leaving it untouched"
                );
                Ok(MigrationOutcome::Downgrade { stored, running })
            }
            Ordering::Less => {
                info!(from = stored, to = running, "migration needed");
                let actions = self.migrate(stored, running)?;
                info!(from = stored, to = running, "migration completed");
                Ok(MigrationOutcome::Migrated {
                    from: stored,
                    to: running,
                    actions,
                })
            }
        }
    }

    fn migrate(&self, stored: u32, running: u32) -> Result<Vec<MigrationAction>> {
        let ctx = StepContext {
            now: now_millis(),
            pretty_json: self.pretty_json,
        };

        let mut actions = Vec::new();
        for step in steps::pending(stored, running) {
            let action = (step.run)(self.backend, &ctx)?;
            debug!(version = step.version, step = step.description, ?action, "step done");
            actions.push(action);
        }

        let marker = VersionMarker::stamped(&self.running);
        let bytes = serde_json::to_vec_pretty(&marker).map_err(WalletError::Serialization)?;
        self.backend.write_marker(&bytes)?;
        Ok(actions)
    }
}
