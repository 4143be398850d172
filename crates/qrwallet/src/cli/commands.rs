//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Run startup (migration, then load) through `initialize`
//! 3. **Dispatch**: Route commands to the API facade
//! 4. **Output Formatting**: Hand results to `render`
//!
//! Errors bubble up as `anyhow::Error`; `main` prints them and exits with 1.

use super::logging;
use super::render::{
    render_messages, render_records, render_shown, render_status, to_json, TextRenderer,
};
use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use qrwalletapp::collab::ScanOutcome;
use qrwalletapp::commands::CmdResult;
use qrwalletapp::init::initialize;
use std::io::{IsTerminal, Read};
use tracing::debug;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = initialize(cli.data_dir.clone())?;
    debug!(path = %ctx.data_dir.display(), migration = ?ctx.migration, "wallet ready");

    let command = cli.command.unwrap_or(Commands::List {
        search: None,
        json: false,
    });

    match command {
        Commands::List { search, json } => {
            let result = ctx.api.list(search.as_deref())?;
            if json {
                print!("{}", to_json(&result.listed_records)?);
            } else {
                print!("{}", render_records(&result.listed_records));
            }
        }
        Commands::Add { content } => {
            let result = match content {
                Some(content) => ctx.api.add(&content)?,
                None => ctx.api.add_scanned(read_scanned_payload()?)?,
            };
            print_modification(&result);
        }
        Commands::Rename { selector, name } => {
            let result = ctx.api.rename(&selector, &name.join(" "))?;
            print_modification(&result);
        }
        Commands::Delete { selectors } => {
            let result = ctx.api.delete_records(&selectors)?;
            print!("{}", render_messages(&result.messages));
        }
        Commands::Move { from, to } => {
            let result = ctx.api.move_record(from, to)?;
            print_modification(&result);
        }
        Commands::Show {
            selectors,
            size,
            json,
        } => {
            let result = ctx.api.show(&selectors, size)?;
            if json {
                print!("{}", to_json(&result.render_requests)?);
            } else {
                print!(
                    "{}",
                    render_shown(&TextRenderer, &result.listed_records, &result.render_requests)
                );
            }
        }
        Commands::Status { json } => {
            let result = ctx.api.status()?;
            let Some(status) = result.status.as_ref() else {
                bail!("status is unavailable");
            };
            if json {
                print!("{}", to_json(status)?);
            } else {
                print!("{}", render_status(status));
                print!("{}", render_messages(&result.messages));
            }
        }
    }

    Ok(())
}

fn print_modification(result: &CmdResult) {
    print!("{}", render_messages(&result.messages));
    if !result.affected_records.is_empty() {
        print!("{}", render_records(&result.affected_records));
    }
}

/// Read a scanner payload from stdin. An empty pipe means nothing was scanned.
fn read_scanned_payload() -> Result<ScanOutcome> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("Nothing to add: pass CONTENT or pipe a scanned payload");
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read scanned payload from stdin")?;
    Ok(ScanOutcome::from_payload(Some(strip_trailing_newline(buffer))))
}

fn strip_trailing_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
