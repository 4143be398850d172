//! # QR Wallet Architecture
//!
//! QR Wallet keeps a personal, ordered collection of scanned QR codes on local
//! disk. This crate is the **UI-agnostic core**: it is a library that happens to
//! have a CLI client, not a CLI with some library code.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the snapshot, parses selectors                      │
//! │  - SharedWallet for multi-threaded callers                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, migration/)                         │
//! │  - RecordStore: the only writer of the records file         │
//! │  - MigrationGate: runs once, before the first load          │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr or exits the process. Events are
//! emitted through `tracing`; whoever embeds the library decides where they go.
//!
//! Scanning and rendering images are outside the core. See [`collab`] for the
//! seams through which they connect.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade and shared wallet
//! - [`commands`]: Business logic per operation
//! - [`config`]: Layered configuration
//! - [`index`]: Display indexes and selectors
//! - [`init`]: Data dir resolution and two-phase startup
//! - [`migration`]: Version marker and migration steps
//! - [`model`]: Persisted types
//! - [`store`]: Record Store and storage backends

pub mod api;
pub mod collab;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod migration;
pub mod model;
pub mod store;
