//! JSON output for snapshot listings.
//!
//! Serializes the listing for scripting and piping.

use crate::snapshot::SnapshotInfo;

pub fn render(snapshots: &[SnapshotInfo]) -> String {
    serde_json::to_string_pretty(snapshots).unwrap_or_else(|_| String::from("[]"))
}
