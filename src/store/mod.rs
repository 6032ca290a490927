//! On-disk snapshot store.
//!
//! Layout under the working directory:
//! ```text
//! .snap/
//!   config.toml        # optional
//!   .lock              # present while a locked save/restore runs
//!   <id>/
//!     .snap            # record: message line, timestamp line
//!     ...              # full copy of the working tree
//! ```
//! Snapshots written by older versions have no `.snap` record; theirs is an
//! `info` file among the copied ones (see [`Store::is_legacy`]).

pub mod lock;
pub mod record;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, SnapError};
use crate::tree;

pub const STORE_DIR: &str = ".snap";

/// Resolves paths inside the store for one working directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    dir: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let dir = root.join(STORE_DIR);
        Store { root, dir }
    }

    /// The working directory this store belongs to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Creates the store directory if it is missing.
    pub fn ensure(&self) -> Result<()> {
        if self.exists() {
            return Ok(());
        }

        tree::dir_builder()
            .create(&self.dir)
            .map_err(|source| SnapError::StoreCreate {
                path: self.dir.clone(),
                source,
            })?;
        info!("created store at {}", self.dir.display());
        Ok(())
    }

    pub fn snapshot_dir(&self, id: u64) -> PathBuf {
        self.dir.join(id.to_string())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.snapshot_dir(id).is_dir()
    }

    /// True when snapshot `id` keeps an `info` record among its copied files.
    ///
    /// Decided by the absence of `<id>/.snap`, a name no copied tree contains.
    pub fn is_legacy(&self, id: u64) -> bool {
        !self.snapshot_dir(id).join(record::RECORD_FILE).is_file()
    }

    /// Snapshot ids present in the store, sorted ascending.
    ///
    /// Hidden entries and names that are not a plain decimal number are
    /// ignored. A missing store yields no ids.
    pub fn ids(&self) -> Result<Vec<u64>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(id) = parse_id(name) {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// One greater than the highest existing id, or 1 for an empty store.
    pub fn next_id(&self) -> Result<u64> {
        let next = self.ids()?.last().map_or(1, |max| max + 1);
        debug!("next snapshot id is {next}");
        Ok(next)
    }
}

/// Accepts positive canonical decimal names only: no sign, no leading zeros.
fn parse_id(name: &str) -> Option<u64> {
    if name.starts_with('0') || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}
