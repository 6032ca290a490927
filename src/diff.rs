//! Bridge to an external directory-diff program.
//!
//! The tool does not compare trees itself. It hands both directories to
//! `diff -r` (or whatever `diff_program` names) and relays the text.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, SnapError};

pub trait DiffBridge {
    /// Returns the human-readable report comparing `snapshot` against `working`,
    /// ignoring entries named in `exclude`.
    fn run_diff(&self, snapshot: &Path, working: &Path, exclude: &[&str]) -> Result<String>;
}

/// Runs `<program> -r -x <name>... <snapshot> .` from inside the working
/// directory and captures stdout.
pub struct ExternalDiff {
    program: String,
}

impl ExternalDiff {
    pub fn new(program: impl Into<String>) -> Self {
        ExternalDiff {
            program: program.into(),
        }
    }
}

impl DiffBridge for ExternalDiff {
    fn run_diff(&self, snapshot: &Path, working: &Path, exclude: &[&str]) -> Result<String> {
        // relative paths keep the report readable
        let snapshot = snapshot.strip_prefix(working).unwrap_or(snapshot);

        let mut cmd = Command::new(&self.program);
        cmd.current_dir(working).arg("-r");
        for name in exclude {
            cmd.arg("-x").arg(name);
        }
        cmd.arg(snapshot).arg(".");

        let output = cmd.output().map_err(|source| SnapError::Diff {
            program: self.program.clone(),
            source,
        })?;

        // diff exits 1 when the trees differ; the status carries nothing we use
        debug!("{} exited with {}", self.program, output.status);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// True for the `Only in <dir>: <name>` line that reports `name` directly
/// under one of `dirs`. Entries of the same name deeper down do not match.
pub fn is_only_in(line: &str, dirs: &[&Path], name: &str) -> bool {
    let Some(rest) = line.strip_prefix("Only in ") else {
        return false;
    };
    let Some((dir, entry)) = rest.rsplit_once(": ") else {
        return false;
    };
    let dir = dir.trim_end_matches('/');
    entry == name && dirs.iter().any(|d| Path::new(dir) == *d)
}

/// Keeps at most `max_lines` lines of a report.
pub fn truncate_report(report: &str, max_lines: usize) -> Vec<String> {
    report
        .lines()
        .take(max_lines)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn report_truncated_to_limit() {
        let report = "diff -r a/x ./x\n1c1\n< old\n---\n> new\n";

        assert_eq!(truncate_report(report, 3), vec!["diff -r a/x ./x", "1c1", "< old"]);
        assert_eq!(truncate_report(report, 20).len(), 5);
        assert!(truncate_report("", 20).is_empty());
    }

    #[test]
    fn only_in_matches_top_level_entry_only() {
        let snapshot = Path::new(".snap/1");
        let dirs = [snapshot];

        assert!(is_only_in("Only in .snap/1: info", &dirs, "info"));
        assert!(is_only_in("Only in .snap/1/: info", &dirs, "info"));
        assert!(!is_only_in("Only in .snap/1/docs: info", &dirs, "info"));
        assert!(!is_only_in("Only in .: info", &dirs, "info"));
        assert!(!is_only_in("Only in .snap/1: information", &dirs, "info"));
        assert!(!is_only_in("Files .snap/1/info and ./info differ", &dirs, "info"));
    }

    #[test]
    fn missing_program_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bridge = ExternalDiff::new("snap-test-no-such-diff-program");

        let err = bridge.run_diff(dir.path(), dir.path(), &[]).unwrap_err();
        assert!(matches!(err, SnapError::Diff { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn runs_program_from_working_dir_with_relative_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".snap/1")).unwrap();

        // echo prints its arguments, which is enough to check the command line
        let bridge = ExternalDiff::new("echo");
        let out = bridge
            .run_diff(&dir.path().join(".snap/1"), dir.path(), &[".snap"])
            .unwrap();

        assert_eq!(out.trim(), "-r -x .snap .snap/1 .");
    }
}
