// Integration tests for the split engine
// Tests cover: file layout, naming, compaction, statistics, error paths

use std::fs;
use std::path::{Path, PathBuf};

use imgsplit::{
    AlwaysOverwrite, Chunker, NoProgress, ProgressFn, SplitConfig, SplitError, prepare_output_dir,
};
use tempfile::TempDir;

/// Writes `data` to `<tmp>/<name>` and returns a prepared config for it.
fn source(name: &str, data: &[u8]) -> (TempDir, SplitConfig) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    let config = SplitConfig::new(path).unwrap();
    prepare_output_dir(config.output_dir(), &mut AlwaysOverwrite).unwrap();
    (dir, config)
}

/// Output files sorted by the numeric offset in their name.
fn outputs(dir: &Path) -> Vec<(u64, PathBuf)> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let path = e.unwrap().path();
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            let index = stem.rsplit('-').next().unwrap().parse::<u64>().unwrap();
            (index, path)
        })
        .collect();
    files.sort();
    files
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 13) as u8).collect()
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_ten_thousand_bytes_default_chunk_size() {
    let data = pattern(10000);
    let (_tmp, config) = source("disk.img", &data);

    let stats = Chunker::new(config.clone()).run(NoProgress).unwrap();

    let files = outputs(config.output_dir());
    let offsets: Vec<_> = files.iter().map(|(o, _)| *o).collect();
    let sizes: Vec<_> = files
        .iter()
        .map(|(_, p)| fs::metadata(p).unwrap().len())
        .collect();

    assert_eq!(offsets, vec![0, 4096, 8192]);
    assert_eq!(sizes, vec![4096, 4096, 1808]);
    assert_eq!(stats.written_chunks, 3);
    assert_eq!(stats.total_length, 10000);

    for name in ["disk-0.img", "disk-4096.img", "disk-8192.img"] {
        assert!(config.output_dir().join(name).is_file(), "missing {name}");
    }
}

#[test]
fn test_round_trip_without_compaction() {
    for (len, chunk_size) in [(0usize, 16usize), (1, 16), (1000, 1), (1000, 64), (4096, 4096), (5000, 333)] {
        let data = pattern(len);
        let (_tmp, config) = source("blob.bin", &data);
        let config = config.with_chunk_size(chunk_size);

        Chunker::new(config.clone()).run(NoProgress).unwrap();

        let mut rebuilt = Vec::new();
        for (_, path) in outputs(config.output_dir()) {
            rebuilt.extend(fs::read(path).unwrap());
        }
        assert_eq!(rebuilt, data, "len={len} chunk_size={chunk_size}");
    }
}

#[test]
fn test_empty_source() {
    let (_tmp, config) = source("empty.img", &[]);

    let mut updates = Vec::new();
    let stats = Chunker::new(config.clone())
        .run(ProgressFn(|done: u64, total: u64| updates.push((done, total))))
        .unwrap();

    assert!(outputs(config.output_dir()).is_empty());
    assert_eq!(stats.written_chunks, 0);
    assert_eq!(updates, vec![(0, 0)]);
}

#[test]
fn test_progress_once_per_iteration() {
    let (_tmp, config) = source("disk.img", &pattern(8192));

    let mut updates = Vec::new();
    Chunker::new(config)
        .run(ProgressFn(|done: u64, _total: u64| updates.push(done)))
        .unwrap();

    // ceil((8192 + 1) / 4096) iterations, the last one reads nothing.
    assert_eq!(updates, vec![4096, 8192, 8192]);
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn test_index_width_pads_offsets() {
    let (_tmp, config) = source("Card.IMG", &pattern(300));
    let config = config.with_chunk_size(128).with_index_width(4);

    Chunker::new(config.clone()).run(NoProgress).unwrap();

    let mut names: Vec<_> = fs::read_dir(config.output_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Card-0000.img", "Card-0128.img", "Card-0256.img"]);
}

#[test]
fn test_index_wider_than_width_is_not_truncated() {
    let (_tmp, config) = source("disk.img", &pattern(24690));
    let config = config.with_chunk_size(12345).with_index_width(2);

    Chunker::new(config.clone()).run(NoProgress).unwrap();

    assert!(config.output_dir().join("disk-00.img").is_file());
    assert!(config.output_dir().join("disk-12345.img").is_file());
}

#[test]
fn test_index_tracks_offset_not_ordinal() {
    let (_tmp, config) = source("disk.img", &pattern(100));
    let config = config.with_chunk_size(50);

    Chunker::new(config.clone()).run(NoProgress).unwrap();

    assert!(config.output_dir().join("disk-50.img").is_file());
    assert!(!config.output_dir().join("disk-1.img").exists());
}

// ============================================================================
// Compaction
// ============================================================================

#[test]
fn test_all_zero_source_writes_nothing() {
    let (_tmp, config) = source("zeros.img", &vec![0u8; 9000]);
    let config = config.with_compact(true);

    let stats = Chunker::new(config.clone()).run(NoProgress).unwrap();

    assert!(outputs(config.output_dir()).is_empty());
    assert_eq!(stats.skipped_chunks, 3);
    assert_eq!(stats.skipped_bytes, 9000);
    assert_eq!(stats.compressed_bytes, 0);
    assert_eq!(stats.remaining_bytes(), 0);
}

#[test]
fn test_compaction_trims_trailing_zeros() {
    let (_tmp, config) = source("tiny.img", b"\x01\x00\x00");
    let config = config.with_compact(true);

    let stats = Chunker::new(config.clone()).run(NoProgress).unwrap();

    assert_eq!(fs::read(config.output_dir().join("tiny-0.img")).unwrap(), b"\x01");
    assert_eq!(stats.compressed_bytes, 2);
    assert_eq!(stats.skipped_chunks, 0);
}

#[test]
fn test_compaction_leaves_non_zero_tail_alone() {
    let mut data = vec![0u8; 64];
    data[10] = 5;
    data[63] = 9;
    let (_tmp, config) = source("disk.img", &data);
    let config = config.with_chunk_size(64).with_compact(true);

    let stats = Chunker::new(config.clone()).run(NoProgress).unwrap();

    assert_eq!(fs::read(config.output_dir().join("disk-0.img")).unwrap(), data);
    assert_eq!(stats.compressed_bytes, 0);
}

#[test]
fn test_compaction_on_sparse_image() {
    // Three 4 KiB blocks: data, hole, data with a zero tail.
    let mut data = vec![0u8; 3 * 4096];
    data[..100].copy_from_slice(&pattern(100));
    data[8192] = 0xFF;
    let (_tmp, config) = source("sparse.img", &data);
    let config = config.with_compact(true).with_index_width(6);

    let stats = Chunker::new(config.clone()).run(NoProgress).unwrap();

    let files = outputs(config.output_dir());
    let offsets: Vec<_> = files.iter().map(|(o, _)| *o).collect();
    assert_eq!(offsets, vec![0, 8192]);
    assert!(config.output_dir().join("sparse-008192.img").is_file());
    assert_eq!(fs::read(&files[1].1).unwrap(), vec![0xFF]);

    assert_eq!(stats.skipped_chunks, 1);
    assert_eq!(stats.written_chunks, 2);
    assert_eq!(stats.saved_bytes() + stats.written_bytes, stats.total_length);
}

#[test]
fn test_summary_mentions_compaction() {
    let (_tmp, config) = source("zeros.img", &vec![0u8; 9000]);
    let config = config.with_compact(true);

    let stats = Chunker::new(config).run(NoProgress).unwrap();
    let text = stats.summary(true).to_string();

    assert!(text.starts_with("Splitting finished in "));
    assert!(text.contains("Compressor skipped 3 times."));
    assert!(text.contains("Total compressed: 9 KB."));
    assert!(text.contains("Total size: 0 KB."));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_source_is_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = SplitConfig::new(tmp.path().join("missing.img")).unwrap();

    let err = Chunker::new(config).run(NoProgress).unwrap_err();
    assert!(matches!(err, SplitError::SourceNotFound { .. }));
    assert!(err.is_config());
}

#[test]
fn test_missing_output_dir_is_write_error() {
    let (_tmp, config) = source("disk.img", &pattern(10));
    let nested = config.output_dir().join("nested/not/created");
    let config = config.with_output_dir(nested);

    let err = Chunker::new(config).run(NoProgress).unwrap_err();
    assert!(matches!(err, SplitError::Write { offset: 0, .. }));
}

#[test]
fn test_output_dir_holding_source_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("disk.img");
    fs::write(&path, pattern(10)).unwrap();
    let config = SplitConfig::new(&path)
        .unwrap()
        .with_output_dir(tmp.path());

    let err = config.validate().unwrap_err();
    assert!(err.is_config());

    let err = Chunker::new(config).run(NoProgress).unwrap_err();
    assert!(err.is_config());
    assert_eq!(fs::read(&path).unwrap(), pattern(10));
}
