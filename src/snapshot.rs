//! Save, list, restore and diff snapshots of a working directory.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::diff::{self, DiffBridge};
use crate::error::{Result, SnapError};
use crate::store::lock::StoreLock;
use crate::store::record::{self, Record, LEGACY_RECORD_FILE};
use crate::store::{Store, STORE_DIR};
use crate::tree::{self, CopyReport};

/// One row of `snap list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotInfo {
    pub id: u64,
    pub message: String,
    pub timestamp: i64,
    /// `timestamp` rendered for display.
    pub time: String,
}

#[derive(Debug)]
pub struct Saved {
    pub id: u64,
    pub report: CopyReport,
}

#[derive(Debug)]
pub struct Restored {
    pub copied: CopyReport,
    /// Working entries that could not be erased before the copy.
    pub not_erased: Vec<PathBuf>,
}

pub struct SnapshotService {
    store: Store,
    config: Config,
}

impl SnapshotService {
    /// Opens the store under `root`, reading `.snap/config.toml` when present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Store::new(root);
        let config = Config::load(store.dir())?;
        Ok(SnapshotService { store, config })
    }

    pub fn with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        SnapshotService {
            store: Store::new(root),
            config,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn init(&self) -> Result<()> {
        self.store.ensure()
    }

    /// Copies the working tree into a new snapshot and returns its id.
    pub fn save(&self, message: Option<&str>) -> Result<Saved> {
        self.store.ensure()?;
        let _lock = self.lock()?;

        let id = self.store.next_id()?;
        let snapshot_dir = self.store.snapshot_dir(id);
        tree::create_dir(&snapshot_dir)?;

        // the record goes in first so the snapshot never looks like a legacy one
        let message = message.unwrap_or(self.config.default_message.as_str());
        let record = Record::now(message, self.config.max_message_len);
        record::write_record(&snapshot_dir, &record)?;

        let report = tree::copy_tree(self.store.root(), &snapshot_dir, STORE_DIR)?;

        info!(
            "saved snapshot #{id}: {} files, {} dirs, {} skipped",
            report.files,
            report.dirs,
            report.skipped.len()
        );
        Ok(Saved { id, report })
    }

    /// Snapshots in ascending id order. Entries whose record is missing or
    /// malformed are left out.
    pub fn list(&self) -> Result<Vec<SnapshotInfo>> {
        if !self.store.exists() {
            return Err(SnapError::NoStore(self.store.dir().to_path_buf()));
        }

        let mut snapshots = Vec::new();
        for id in self.store.ids()? {
            match record::read_record(&self.store.snapshot_dir(id)) {
                Ok(Record { message, timestamp }) => snapshots.push(SnapshotInfo {
                    id,
                    message,
                    timestamp,
                    time: record::format_timestamp(timestamp),
                }),
                Err(e) => debug!("skipping snapshot #{id}: {e}"),
            }
        }

        Ok(snapshots)
    }

    /// Replaces the working tree with the contents of snapshot `id`.
    ///
    /// Destructive: everything outside the store is erased first and no
    /// backup is taken. Entries that refuse to be erased are reported in
    /// [`Restored::not_erased`] and the snapshot is copied back regardless.
    pub fn restore(&self, id: u64) -> Result<Restored> {
        if !self.store.contains(id) {
            return Err(SnapError::NotFound(id));
        }
        let _lock = self.lock()?;

        let root = self.store.root();
        let source = self.store.snapshot_dir(id);
        let legacy = self.store.is_legacy(id);

        let mut not_erased = tree::erase_contents(root, STORE_DIR)?;
        let copied = tree::copy_tree(&source, root, STORE_DIR)?;

        // legacy snapshots carry their record among the copied files
        if legacy {
            let remnant = root.join(LEGACY_RECORD_FILE);
            if let Err(e) = tree::erase(&remnant) {
                debug!("could not erase {}: {e}", remnant.display());
                not_erased.push(remnant);
            }
        }

        info!(
            "restored snapshot #{id}: {} files, {} not erased",
            copied.files,
            not_erased.len()
        );
        Ok(Restored { copied, not_erased })
    }

    /// Differences between snapshot `id` and the working tree, as reported by
    /// `bridge`, cut to `diff_max_lines`.
    pub fn diff(&self, id: u64, bridge: &dyn DiffBridge) -> Result<Vec<String>> {
        if !self.store.contains(id) {
            return Err(SnapError::NotFound(id));
        }

        let snapshot = self.store.snapshot_dir(id);
        let mut report = bridge.run_diff(&snapshot, self.store.root(), &[STORE_DIR])?;

        // only the top-level record of a legacy snapshot is noise; nested
        // files of the same name are real content
        if self.store.is_legacy(id) {
            let relative = snapshot.strip_prefix(self.store.root()).unwrap_or(&snapshot);
            let dirs = [snapshot.as_path(), relative];
            report = report
                .lines()
                .filter(|line| !diff::is_only_in(line, &dirs, LEGACY_RECORD_FILE))
                .map(|line| format!("{line}\n"))
                .collect();
        }

        Ok(diff::truncate_report(&report, self.config.diff_max_lines))
    }

    pub fn snapshot_path(&self, id: u64) -> PathBuf {
        self.store.snapshot_dir(id)
    }

    fn lock(&self) -> Result<Option<StoreLock>> {
        if !self.config.lock {
            return Ok(None);
        }
        StoreLock::acquire(self.store.dir()).map(Some)
    }
}
