//! Configuration for filekv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::logger::Logger;

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file holding the JSON snapshot
    /// Relative paths resolve against the process working directory.
    pub path: PathBuf,

    /// How a snapshot replaces the previous file contents
    pub persist_mode: PersistMode,

    /// fsync the snapshot before a mutation reports success
    pub sync_on_persist: bool,

    // -------------------------------------------------------------------------
    // Observability
    // -------------------------------------------------------------------------
    /// Scoped logger supplied by the host
    pub logger: Logger,
}

/// Persist strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Truncate the backing file and rewrite it in place.
    /// A crash mid-write can leave a truncated or empty file.
    Rewrite,

    /// Write `<file>.tmp` next to the target, then rename it over the target.
    /// Readers see either the old or the new snapshot, never a partial one.
    AtomicReplace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./filekv.json"),
            persist_mode: PersistMode::Rewrite,
            sync_on_persist: false,
            logger: Logger::disabled(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the logger
    pub fn logger(mut self, logger: Logger) -> Self {
        self.config.logger = logger;
        self
    }

    /// Set the persist mode
    pub fn persist_mode(mut self, mode: PersistMode) -> Self {
        self.config.persist_mode = mode;
        self
    }

    /// Enable or disable fsync after every persist
    pub fn sync_on_persist(mut self, sync: bool) -> Self {
        self.config.sync_on_persist = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
