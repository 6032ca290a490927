//! Snapshot record: a two-line text file holding the message and the save time.
//!
//! ```text
//! fixed the parser
//! 1718000000
//! ```
//!
//! The record lives at `<id>/.snap`. Tree copies leave out every entry named
//! like the store, so no copied file can take that name. Flat snapshots from
//! older versions keep theirs at `<id>/info` instead.

use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::error::{Result, SnapError};

pub const RECORD_FILE: &str = super::STORE_DIR;

/// Record name in flat snapshots, where it sits among the copied files.
pub const LEGACY_RECORD_FILE: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub message: String,
    pub timestamp: i64,
}

impl Record {
    /// Builds a record stamped with the current time.
    pub fn now(message: &str, max_len: usize) -> Self {
        Record {
            message: sanitize_message(message, max_len),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Writes `<snapshot_dir>/.snap`.
pub fn write_record(snapshot_dir: &Path, record: &Record) -> Result<()> {
    let content = format!("{}\n{}\n", record.message, record.timestamp);
    fs::write(snapshot_dir.join(RECORD_FILE), content)?;
    Ok(())
}

/// Reads the record of a snapshot in either layout.
pub fn read_record(snapshot_dir: &Path) -> Result<Record> {
    let mut path = snapshot_dir.join(RECORD_FILE);
    if !path.is_file() {
        path = snapshot_dir.join(LEGACY_RECORD_FILE);
    }
    let content = fs::read_to_string(&path)?;
    let mut lines = content.lines();

    let message = lines
        .next()
        .ok_or_else(|| SnapError::record(&path, "empty file"))?
        .to_string();
    let timestamp = lines
        .next()
        .ok_or_else(|| SnapError::record(&path, "missing timestamp"))?
        .trim()
        .parse::<i64>()
        .map_err(|e| SnapError::record(&path, format!("bad timestamp: {e}")))?;

    Ok(Record { message, timestamp })
}

/// Keeps the message on one line and within `max_len` bytes.
pub fn sanitize_message(message: &str, max_len: usize) -> String {
    let single_line: String = message
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if single_line.len() <= max_len {
        return single_line;
    }

    let mut end = max_len;
    while !single_line.is_char_boundary(end) {
        end -= 1;
    }
    single_line[..end].to_string()
}

/// Local time in `ctime` layout, e.g. `Thu Jun 13 09:20:00 2024`.
pub fn format_timestamp(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
