//! # Storage Layer
//!
//! The wallet is a flat file store in one app-private directory. There is no
//! database and no index: the records file *is* the ordered sequence.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: raw byte I/O ("how"). Filesystem or memory.
//! - [`record_store::RecordStore`]: sequence semantics ("what"). Dedup by
//!   content, rename, bulk delete, reorder, and the single `save` write path.
//! - [`codec`]: the JSON document format of the records file.
//!
//! ## Write Discipline
//!
//! Every mutation is "compute the new full sequence, then overwrite the file".
//! Writes go to a temp file which is renamed over the target, so a crash
//! leaves either the old or the new file, never a torn one.
//!
//! The store takes no locks. Two overlapping load-modify-save cycles would
//! lose one writer's update; serialization is the caller's job (see
//! [`crate::api::WalletApi`] and [`crate::api::SharedWallet`]).
//!
//! ## Corruption
//!
//! `load` never fails on unparseable content; it reports an empty wallet.
//! Quarantining the bad file belongs to [`crate::migration`], which runs first.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── qr_codes.json                    # Records file
//! ├── app_version.json                 # Version marker
//! ├── qrwallet.toml                    # Optional configuration
//! └── qr_codes_backup_<millis>.json    # Quarantined corrupt records files
//! ```

pub mod backend;
pub mod codec;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use record_store::RecordStore;
