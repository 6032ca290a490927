pub mod table;
pub mod json;

use crate::snapshot::{Saved, SnapshotInfo};
use crate::util::format_bytes;

pub fn print_list(snapshots: &[SnapshotInfo], json_output: bool) {
    if json_output {
        println!("{}", json::render(snapshots));
    } else {
        print!("{}", table::render(snapshots));
    }
}

pub fn print_saved(saved: &Saved, verbose: bool) {
    let report = &saved.report;
    println!(
        "✓ snapshot #{} saved ({} files, {})",
        saved.id,
        report.files,
        format_bytes(report.bytes)
    );

    if report.skipped.is_empty() {
        return;
    }

    if verbose {
        println!("skipped:");
        for path in &report.skipped {
            println!("  {}", path.display());
        }
    } else {
        println!("[skipped] {} entries could not be copied (use -v to list them)", report.skipped.len());
    }
}

pub fn print_diff(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
