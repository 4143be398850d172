//! # QR Wallet CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/qrwalletapp/`: Core library: records, storage, migration
//! - `crates/qrwallet/`: This CLI tool, one possible UI over the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/qrwallet/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal and JSON output (render.rs)                     │
//! │  - tracing subscriber on stderr (logging.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/qrwalletapp/src/api.rs)                  │
//! │  - Owns the snapshot, parses selectors                      │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer is responsible
//! for **all** user-facing concerns: argument parsing, context initialization,
//! dispatch, error reporting, and rendering.
//!
//! ## Testing Approach
//!
//! - Library behaviour is tested inside `qrwalletapp`.
//! - Rendering helpers carry unit tests in `render.rs`.
//! - `tests/cli_e2e.rs` drives the real binary against a temporary data dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
