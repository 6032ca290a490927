//! Plain-text snapshot listing.
//!
//! ```text
//! Snapshots:
//!   #1 - first cut (Thu Jun 13 09:20:00 2024)
//! ```

use crate::snapshot::SnapshotInfo;

pub fn render(snapshots: &[SnapshotInfo]) -> String {
    let mut output = String::from("Snapshots:\n");

    for snapshot in snapshots {
        output.push_str(&format!(
            "  #{} - {} ({})\n",
            snapshot.id, snapshot.message, snapshot.time
        ));
    }

    output
}
