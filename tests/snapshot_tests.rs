//! Tests for SnapshotReader and SnapshotWriter
//!
//! These tests verify:
//! - Missing files load as "no snapshot"
//! - Decode failures for malformed contents
//! - Full rewrite (truncate) semantics
//! - Temp-file-plus-rename mode
//! - Error kinds for open failures

use std::fs;

use filekv::config::PersistMode;
use filekv::snapshot::{Entries, SnapshotReader, SnapshotWriter};
use filekv::FileKvError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn entries(pairs: &[(&str, &str)]) -> Entries {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Reader Tests
// =============================================================================

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let loaded = SnapshotReader::load(&temp_dir.path().join("absent.json")).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_load_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    fs::write(&path, "{\"foo\": \"bar\",\n \"foo2\": \"foo2 value\"}\n").unwrap();

    let loaded = SnapshotReader::load(&path).unwrap().unwrap();

    assert_eq!(loaded, entries(&[("foo", "bar"), ("foo2", "foo2 value")]));
}

#[test]
fn test_load_empty_object() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    fs::write(&path, "{}").unwrap();

    let loaded = SnapshotReader::load(&path).unwrap().unwrap();

    assert!(loaded.is_empty());
}

#[test]
fn test_load_rejects_malformed_contents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");

    let cases = [
        "",
        "null",
        "[\"foo\", \"bar\"]",
        "{\"foo\": 42}",
        "{\"foo\": \"bar\"",
        "{\"foo\": \"bar\"} trailing",
    ];

    for case in cases {
        fs::write(&path, case).unwrap();
        let result = SnapshotReader::load(&path);
        assert!(
            matches!(result, Err(FileKvError::Decode { .. })),
            "expected decode error for {:?}, got {:?}",
            case,
            result
        );
    }
}

// =============================================================================
// Writer Tests
// =============================================================================

#[test]
fn test_persist_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    let writer = SnapshotWriter::new(&path, PersistMode::Rewrite, false);

    let written = writer.persist(&entries(&[("foo", "bar")])).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\"foo\":\"bar\"}\n");
    assert_eq!(written, content.len());
}

#[test]
fn test_persist_truncates_previous_contents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    let writer = SnapshotWriter::new(&path, PersistMode::Rewrite, false);

    writer
        .persist(&entries(&[("a_long_key", "a much longer value than the next one")]))
        .unwrap();
    writer.persist(&entries(&[("b", "c")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"b\":\"c\"}\n");
}

#[test]
fn test_persist_empty_map() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    let writer = SnapshotWriter::new(&path, PersistMode::Rewrite, true);

    writer.persist(&Entries::new()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    assert!(SnapshotReader::load(&path).unwrap().unwrap().is_empty());
}

#[test]
fn test_persist_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    let writer = SnapshotWriter::new(&path, PersistMode::Rewrite, false);
    let data = entries(&[("k1", "v1"), ("k2", "line\nbreak"), ("k3", "tab\there")]);

    writer.persist(&data).unwrap();

    assert_eq!(SnapshotReader::load(&path).unwrap(), Some(data));
}

#[test]
fn test_persist_missing_directory_is_open_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("memory.json");
    let writer = SnapshotWriter::new(&path, PersistMode::Rewrite, false);

    let result = writer.persist(&entries(&[("foo", "bar")]));

    match result {
        Err(FileKvError::Open { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected open error, got {:?}", other),
    }
}

#[test]
fn test_atomic_replace_temp_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    let writer = SnapshotWriter::new(&path, PersistMode::AtomicReplace, false);

    assert_eq!(writer.path(), path);
    assert_eq!(writer.temp_path(), temp_dir.path().join("memory.json.tmp"));
}

#[test]
fn test_atomic_replace_persists_and_cleans_up() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    fs::write(&path, "{\"old\":\"value\"}").unwrap();
    let writer = SnapshotWriter::new(&path, PersistMode::AtomicReplace, true);

    writer.persist(&entries(&[("new", "value")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"new\":\"value\"}\n");
    assert!(!writer.temp_path().exists());
}

#[test]
fn test_atomic_replace_failure_leaves_target_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.json");
    fs::write(&path, "{\"old\":\"value\"}").unwrap();
    let writer = SnapshotWriter::new(&path, PersistMode::AtomicReplace, false);

    // A directory squatting on the temp path makes the temp open fail
    fs::create_dir(writer.temp_path()).unwrap();

    let result = writer.persist(&entries(&[("new", "value")]));

    assert!(matches!(result, Err(FileKvError::Open { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"old\":\"value\"}");
}

#[cfg(target_os = "linux")]
#[test]
fn test_persist_write_failure_after_encode_is_flush_error() {
    // Opens fine, but every write fails with ENOSPC
    let path = std::path::Path::new("/dev/full");
    let writer = SnapshotWriter::new(path, PersistMode::Rewrite, false);

    let result = writer.persist(&entries(&[("a", "b")]));

    match result {
        Err(FileKvError::Flush { path: failed, source }) => {
            assert_eq!(failed, path);
            assert_eq!(source.raw_os_error(), Some(28));
        }
        other => panic!("expected flush error, got {:?}", other),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_persist_sync_mode_write_failure_is_flush_error() {
    let writer = SnapshotWriter::new("/dev/full".as_ref(), PersistMode::Rewrite, true);

    let result = writer.persist(&entries(&[("a", "b")]));

    assert!(matches!(result, Err(FileKvError::Flush { .. })));
}

#[test]
fn test_load_directory_is_open_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = SnapshotReader::load(temp_dir.path());

    assert!(
        matches!(result, Err(FileKvError::Open { .. })),
        "expected open error, got {:?}",
        result
    );
}

#[test]
fn test_flush_error_message_mentions_persistence() {
    let err = FileKvError::Flush {
        path: "memory.json".into(),
        source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
    };

    let message = err.to_string();
    assert!(message.contains("might not have been fully persisted"));
    assert!(message.contains("disk full"));
}
