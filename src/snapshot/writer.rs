//! Snapshot Writer
//!
//! Serializes the full map and replaces the backing file's contents.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::PersistMode;
use crate::error::{FileKvError, Result};

use super::{Entries, FILE_MODE, TEMP_SUFFIX};

/// Writes full snapshots to the backing file
///
/// Every call to `persist` replaces the previous contents entirely; there is
/// no append or incremental mode.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    /// Target snapshot path
    path: PathBuf,
    /// In-place rewrite or temp-file-plus-rename
    mode: PersistMode,
    /// fsync before reporting success
    sync: bool,
}

impl SnapshotWriter {
    pub fn new(path: &Path, mode: PersistMode, sync: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            mode,
            sync,
        }
    }

    /// Write `entries` as the new snapshot
    ///
    /// Returns the number of bytes written.
    pub fn persist(&self, entries: &Entries) -> Result<usize> {
        let written = match self.mode {
            PersistMode::Rewrite => self.write_to(&self.path, entries)?,
            PersistMode::AtomicReplace => {
                let temp = self.temp_path();

                let written = match self.write_to(&temp, entries) {
                    Ok(n) => n,
                    Err(e) => {
                        let _ = fs::remove_file(&temp);
                        return Err(e);
                    }
                };

                if let Err(e) = fs::rename(&temp, &self.path) {
                    let _ = fs::remove_file(&temp);
                    return Err(FileKvError::Replace {
                        path: self.path.clone(),
                        source: e,
                    });
                }

                written
            }
        };

        tracing::debug!(
            path = %self.path.display(),
            num_memories = entries.len(),
            bytes = written,
            "Persisted memory file"
        );

        Ok(written)
    }

    /// Target snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scratch path used by `PersistMode::AtomicReplace`: `<file>.tmp`
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(OsString::new);
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Open (truncating), encode, write, and optionally sync a single file
    fn write_to(&self, path: &Path, entries: &Entries) -> Result<usize> {
        let mut file = Self::open_for_write(path).map_err(|e| FileKvError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        // An encode failure drops `file` here; its close result is not reported.
        let mut bytes = serde_json::to_vec(entries).map_err(FileKvError::Encode)?;
        bytes.push(b'\n');

        let flush_err = |e: io::Error| FileKvError::Flush {
            path: path.to_path_buf(),
            source: e,
        };

        file.write_all(&bytes).map_err(flush_err)?;
        if self.sync {
            file.sync_all().map_err(flush_err)?;
        }
        Self::close(file).map_err(flush_err)?;

        Ok(bytes.len())
    }

    /// Close `file`, reporting the error that dropping it would discard
    #[cfg(unix)]
    fn close(file: File) -> io::Result<()> {
        use std::os::unix::io::IntoRawFd;

        let fd = file.into_raw_fd();
        // SAFETY: `into_raw_fd` released ownership, so `fd` is closed exactly once.
        if unsafe { libc::close(fd) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// No fallible close here; syncing surfaces deferred write errors instead
    #[cfg(not(unix))]
    fn close(file: File) -> io::Result<()> {
        file.sync_data()
    }

    fn open_for_write(path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        options.open(path)
    }
}
