//! Recursive tree copy and erase.
//!
//! Copy is best-effort at the file level: an entry that cannot be read or
//! written is recorded in [`CopyReport::skipped`] and the walk continues.
//! Failing to create a directory aborts the copy. Erasing a directory's
//! contents is best-effort the same way.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SnapError};

/// Files are copied through a buffer of this size.
pub const CHUNK_SIZE: usize = 4096;

/// Constructed paths of this many bytes or more are skipped. Matches Linux
/// `PATH_MAX`, which counts the terminating NUL.
pub const MAX_PATH_LEN: usize = 4096;

#[derive(Debug, Default)]
pub struct CopyReport {
    pub files: usize,
    pub dirs: usize,
    pub bytes: u64,
    pub skipped: Vec<PathBuf>,
}

/// Mirrors `src` into `dst`, leaving out every entry named `exclude` at any depth.
///
/// Symlinks are followed. Permissions, timestamps and ownership are not preserved.
pub fn copy_tree(src: &Path, dst: &Path, exclude: &str) -> Result<CopyReport> {
    let mut report = CopyReport::default();
    create_dir(dst)?;

    let mut walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.file_name() != exclude);

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(src).to_path_buf();
                debug!("skipping {}: {e}", path.display());
                report.skipped.push(path);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        let is_dir = entry.file_type().is_dir();

        if too_long(entry.path()) || too_long(&target) {
            debug!("skipping {}: path too long", entry.path().display());
            report.skipped.push(entry.path().to_path_buf());
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        if is_dir {
            create_dir(&target)?;
            report.dirs += 1;
            continue;
        }

        match copy_file(entry.path(), &target) {
            Ok(n) => {
                report.files += 1;
                report.bytes += n;
            }
            Err(e) => {
                debug!("skipping {}: {e}", entry.path().display());
                report.skipped.push(entry.path().to_path_buf());
            }
        }
    }

    Ok(report)
}

/// Deletes `path` and everything beneath it. A missing path is not an error.
///
/// Symlinks are removed, never followed.
pub fn erase(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if meta.is_dir() {
        for entry in fs::read_dir(path)? {
            erase(&entry?.path())?;
        }
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

/// Erases every direct entry of `dir` except the one named `keep`.
///
/// Entries that cannot be erased are returned and the rest are still
/// removed. Only failing to list `dir` itself is an error.
pub fn erase_contents(dir: &Path, keep: &str) -> io::Result<Vec<PathBuf>> {
    erase_contents_with(dir, keep, erase)
}

fn erase_contents_with(
    dir: &Path,
    keep: &str,
    mut remove: impl FnMut(&Path) -> io::Result<()>,
) -> io::Result<Vec<PathBuf>> {
    let mut failed = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = match entry {
            Ok(e) if e.file_name() == keep => continue,
            Ok(e) => e.path(),
            Err(e) => {
                debug!("skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };

        if let Err(e) = remove(&path) {
            debug!("could not erase {}: {e}", path.display());
            failed.push(path);
        }
    }

    Ok(failed)
}

pub(crate) fn create_dir(path: &Path) -> Result<()> {
    dir_builder()
        .create(path)
        .map_err(|source| SnapError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn dir_builder() -> fs::DirBuilder {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
}

fn too_long(path: &Path) -> bool {
    path.as_os_str().len() >= MAX_PATH_LEN
}

fn copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut input = File::open(src)?;
    let mut output = File::create(dst)?;
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        output.write_all(&buf[..n])?;
        total += n as u64;
    }

    Ok(total)
}
