//! Store Module
//!
//! The file-backed key-value store.
//!
//! ## Responsibilities
//! - Load an existing snapshot (or start empty) on open
//! - Serve reads from memory without touching the file
//! - Persist the full map after every successful mutation
//! - Enforce the Open → Closed lifecycle

use std::path::Path;

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{FileKvError, Result};
use crate::snapshot::{Entries, SnapshotReader, SnapshotWriter};

/// Lifecycle of a store's in-memory map
#[derive(Debug)]
enum State {
    Open(Entries),
    Closed,
}

impl State {
    fn entries(&self) -> Result<&Entries> {
        match self {
            State::Open(entries) => Ok(entries),
            State::Closed => Err(FileKvError::Closed),
        }
    }

    fn entries_mut(&mut self) -> Result<&mut Entries> {
        match self {
            State::Open(entries) => Ok(entries),
            State::Closed => Err(FileKvError::Closed),
        }
    }
}

/// In-memory key-value map mirrored to a single JSON file
///
/// ## Concurrency Model
///
/// One `RwLock` guards both the map and the lifecycle state:
/// - **Reads** (get/keys/memories/len): shared lock, never touch the file
/// - **Writes** (set/delete/close): exclusive lock, held across the persist
///   so no reader observes a map whose snapshot has not been attempted
///
/// ## Failed persists
///
/// `set` and `delete` update the map before persisting and do not roll back
/// when the persist fails. After such an error memory is ahead of disk until
/// the next successful mutation rewrites the file.
pub struct Store {
    /// Store configuration
    config: Config,

    /// Writes snapshots to `config.path`
    writer: SnapshotWriter,

    /// Map + lifecycle
    state: RwLock<State>,
}

impl Store {
    /// Open a store backed by `config.path`
    ///
    /// On startup:
    /// 1. Missing file → empty map
    /// 2. Existing file → decode it as the initial map
    /// 3. Unreadable or undecodable file → error, no store
    pub fn open(config: Config) -> Result<Self> {
        let span = config.logger.enter();
        let path = config.path.as_path();

        tracing::debug!(path = %path.display(), "Opening memory file");

        let entries = match SnapshotReader::load(path)? {
            Some(entries) => entries,
            None => {
                tracing::debug!(
                    path = %path.display(),
                    "File does not exist. Continuing with empty memory"
                );
                Entries::new()
            }
        };

        tracing::info!(
            path = %path.display(),
            num_memories = entries.len(),
            "Memory initialized successfully"
        );

        let writer = SnapshotWriter::new(path, config.persist_mode, config.sync_on_persist);
        drop(span);

        Ok(Self {
            config,
            writer,
            state: RwLock::new(State::Open(entries)),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().path(path.as_ref()).build())
    }

    /// Get the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let state = self.state.read();
        Ok(state.entries()?.get(key).cloned())
    }

    /// Insert or overwrite `key`, then persist
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.write();
        let entries = state.entries_mut()?;

        entries.insert(key.to_string(), value.to_string());
        self.persist(entries)
    }

    /// Remove `key`, returning whether it was present
    ///
    /// Absent keys are a no-op: nothing is written and the file's
    /// modification time is left alone.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let mut state = self.state.write();
        let entries = state.entries_mut()?;

        if entries.remove(key).is_none() {
            return Ok(false);
        }

        self.persist(entries)?;
        Ok(true)
    }

    /// Every key, sorted lexicographically
    pub fn keys(&self) -> Result<Vec<String>> {
        let state = self.state.read();
        Ok(state.entries()?.keys().cloned().collect())
    }

    /// Copy of every key-value pair
    pub fn memories(&self) -> Result<Entries> {
        let state = self.state.read();
        Ok(state.entries()?.clone())
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize> {
        let state = self.state.read();
        Ok(state.entries()?.len())
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Discard the in-memory map
    ///
    /// Performs no file I/O. Every later call, including another `close`,
    /// fails with `FileKvError::Closed`.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.write();
        if let State::Closed = *state {
            return Err(FileKvError::Closed);
        }

        *state = State::Closed;

        let _span = self.config.logger.enter();
        tracing::debug!(path = %self.config.path.display(), "Memory closed");
        Ok(())
    }

    /// Internal persist (called with the write lock held)
    fn persist(&self, entries: &Entries) -> Result<()> {
        let _span = self.config.logger.enter();
        self.writer.persist(entries).map(|_| ())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        matches!(*self.state.read(), State::Closed)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
