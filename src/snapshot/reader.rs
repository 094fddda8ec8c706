//! Snapshot Reader
//!
//! Loads a snapshot file into memory at startup.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::error::{FileKvError, Result};

use super::Entries;

/// Reads snapshot files
pub struct SnapshotReader;

impl SnapshotReader {
    /// Load the snapshot at `path`
    ///
    /// Returns:
    /// - `Ok(None)` — no file exists at `path`
    /// - `Ok(Some(entries))` — file decoded as a string→string JSON object
    /// - `Err(Open)` — file exists but cannot be opened or read
    /// - `Err(Decode)` — contents are not a valid string→string JSON object
    pub fn load(path: &Path) -> Result<Option<Entries>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FileKvError::Open {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        tracing::debug!(path = %path.display(), "Decoding JSON from memory file");

        // Read failures (e.g. `path` is a directory) surface through serde_json
        // but are I/O problems, not malformed contents.
        let entries: Entries =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                if e.is_io() {
                    FileKvError::Open {
                        path: path.to_path_buf(),
                        source: e.into(),
                    }
                } else {
                    FileKvError::Decode {
                        path: path.to_path_buf(),
                        source: e,
                    }
                }
            })?;

        Ok(Some(entries))
    }
}
