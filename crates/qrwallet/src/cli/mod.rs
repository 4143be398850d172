//! # CLI Behavior
//!
//! This is **one possible UI client** for the wallet, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`qrwallet`)
//!
//! Running `qrwallet` with no arguments defaults to `qrwallet list`.
//!
//! ## Adding Codes
//!
//! 1. **Argument**: `qrwallet add "https://example.com"`
//! 2. **Piped scan**: `zbarimg -q --raw ticket.png | qrwallet add`
//!
//! Piped input is treated as a scanner result: an empty pipe means nothing was
//! scanned and the wallet is left alone. A single trailing newline is dropped.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `logging`: tracing subscriber setup
//! - `render`: Output formatting (lists, messages, JSON)
//! - `setup`: Argument parsing via clap

mod commands;
mod logging;
mod render;
pub mod setup;

pub use commands::run;
