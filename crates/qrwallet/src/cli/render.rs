//! # Rendering Module
//!
//! Turns `CmdResult` pieces into strings. Handlers in `commands.rs` print them.
//!
//! ## List Layout
//!
//! Each row has:
//! - `index` (4 chars): Display index, right-aligned (" 1.")
//! - `name` (28 chars): Record name, truncated to fit
//! - `content` (fill): One-line preview of the payload, dimmed
//! - `time_ago` (14 chars, right-aligned): When the code was added
//!
//! Widths are measured with `unicode-width`, so names with wide glyphs still line up.
//!
//! `--json` output skips all of this and serializes the library types directly.

use chrono::{DateTime, Utc};
use console::Style;
use qrwalletapp::collab::{RenderRequest, Renderer};
use qrwalletapp::commands::{CmdMessage, MessageLevel, StatusReport};
use qrwalletapp::index::DisplayRecord;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const COL_INDEX: usize = 4;
pub const COL_NAME: usize = 28;
pub const COL_TIME: usize = 14;
const GUTTER: usize = 2;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => Style::new().dim(),
            MessageLevel::Success => Style::new().green(),
            MessageLevel::Warning => Style::new().yellow(),
            MessageLevel::Error => Style::new().red(),
        };
        let _ = writeln!(out, "{}", style.apply_to(&message.content));
    }
    out
}

pub fn render_records(records: &[DisplayRecord]) -> String {
    if records.is_empty() {
        return "No codes stored yet.\n".to_string();
    }

    let index_style = Style::new().yellow();
    let muted = Style::new().dim();
    let content_width = LINE_WIDTH.saturating_sub(COL_INDEX + COL_NAME + COL_TIME + 2 * GUTTER);

    let mut out = String::new();
    for dr in records {
        let index = format!("{:>width$}.", dr.index, width = COL_INDEX - 1);
        let name = pad_to_width(&truncate_to_width(&dr.record.name, COL_NAME), COL_NAME);
        let preview = pad_to_width(
            &truncate_to_width(&one_line(&dr.record.content), content_width),
            content_width,
        );
        let time_ago = format_time_ago(dr.record.created_at);

        let _ = writeln!(
            out,
            "{}{}{}{}{}{}",
            index_style.apply_to(index),
            " ".repeat(GUTTER - 1),
            name,
            " ".repeat(GUTTER),
            muted.apply_to(preview),
            muted.apply_to(time_ago)
        );
    }
    out
}

/// Renders a code as its index, name, size and full payload.
///
/// The terminal cannot draw the image itself, so this stands in for a real
/// barcode renderer and shows what would be encoded.
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;
    type Error = Infallible;

    fn render(&self, request: &RenderRequest) -> Result<String, Infallible> {
        Ok(format!(
            "{} {}\n{}\n",
            Style::new().bold().apply_to(&request.name),
            Style::new()
                .dim()
                .apply_to(format!("[{0}x{0} px]", request.size)),
            request.content
        ))
    }
}

pub fn render_shown<R>(renderer: &R, shown: &[DisplayRecord], requests: &[RenderRequest]) -> String
where
    R: Renderer<Output = String, Error = Infallible>,
{
    let mut out = String::new();
    for (i, (dr, request)) in shown.iter().zip(requests).enumerate() {
        if i > 0 {
            out.push_str("\n--------------------------------\n\n");
        }
        let body = match renderer.render(request) {
            Ok(body) => body,
            Err(never) => match never {},
        };
        let index = Style::new().yellow().apply_to(format!("{}.", dr.index));
        let _ = write!(out, "{} {}", index, body);
    }
    out
}

pub fn render_status(status: &StatusReport) -> String {
    let label = Style::new().dim();
    let mut out = String::new();

    let version = if status.version_name.is_empty() {
        status.schema_version.to_string()
    } else {
        format!("{} (written by v{})", status.schema_version, status.version_name)
    };
    let migrated = match status.last_migrated_at {
        Some(at) => format!(
            "{} ({})",
            at.format("%Y-%m-%d %H:%M:%S UTC"),
            format_time_ago(at).trim_start()
        ),
        None => "never".to_string(),
    };

    let rows = [
        ("Schema version", version),
        ("Last migrated", migrated),
        ("Codes", status.record_count.to_string()),
        ("Records file", status.records_path.display().to_string()),
        ("Version marker", status.marker_path.display().to_string()),
    ];
    for (key, value) in rows {
        let key = label.apply_to(format!("{:<16}", format!("{}:", key)));
        let _ = writeln!(out, "{} {}", key, value);
    }

    if status.backups.is_empty() {
        let _ = writeln!(out, "{} none", label.apply_to(format!("{:<16}", "Backups:")));
    } else {
        let _ = writeln!(out, "{}", label.apply_to("Backups:"));
        for path in &status.backups {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
    out
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

fn one_line(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = COL_TIME)
}
