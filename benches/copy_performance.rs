use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use snap::config::Config;
use snap::tree;
use snap::SnapshotService;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Fixture generator for working trees
mod fixtures {
    use super::*;

    /// Create a directory tree with many small files
    pub fn create_deep_tree(base: &Path, depth: usize, files_per_dir: usize) -> std::io::Result<()> {
        if depth == 0 {
            return Ok(());
        }

        fs::create_dir_all(base)?;

        for i in 0..files_per_dir {
            fs::write(base.join(format!("file-{i}.txt")), "test content")?;
        }

        for i in 0..3 {
            create_deep_tree(&base.join(format!("dir-{i}")), depth - 1, files_per_dir)?;
        }

        Ok(())
    }

    /// Create a flat directory of larger files that span many copy chunks
    pub fn create_large_files(base: &Path, count: usize, size: usize) -> std::io::Result<()> {
        fs::create_dir_all(base)?;
        for i in 0..count {
            fs::write(base.join(format!("blob-{i}.bin")), vec![7u8; size])?;
        }
        Ok(())
    }
}

/// Benchmark: copy of a deep tree of small files
fn bench_copy_deep_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_deep_tree");

    for depth in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            let src = TempDir::new().unwrap();
            fixtures::create_deep_tree(src.path(), depth, 5).unwrap();

            b.iter(|| {
                let dst = TempDir::new().unwrap();
                let report = tree::copy_tree(black_box(src.path()), dst.path(), ".snap").unwrap();
                black_box(report);
            });
        });
    }

    group.finish();
}

/// Benchmark: copy of a few large files
fn bench_copy_large_files(c: &mut Criterion) {
    c.bench_function("copy_large_files", |b| {
        let src = TempDir::new().unwrap();
        // 20 files of 512KB
        fixtures::create_large_files(src.path(), 20, 512 * 1024).unwrap();

        b.iter(|| {
            let dst = TempDir::new().unwrap();
            let report = tree::copy_tree(black_box(src.path()), dst.path(), ".snap").unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: save followed by restore of the same working tree
fn bench_save_restore(c: &mut Criterion) {
    c.bench_function("save_restore_cycle", |b| {
        let work = TempDir::new().unwrap();
        fixtures::create_deep_tree(work.path(), 3, 5).unwrap();
        let service = SnapshotService::with_config(work.path(), Config::default());

        b.iter(|| {
            let saved = service.save(Some("bench")).unwrap();
            service.restore(black_box(saved.id)).unwrap();
            tree::erase(&service.snapshot_path(saved.id)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_copy_deep_tree,
    bench_copy_large_files,
    bench_save_restore,
);

criterion_main!(benches);
