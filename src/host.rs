//! Host integration
//!
//! A host application consumes a storage backend through the `Memory`
//! trait and wires it up by applying `Module`s to its `HostConfig`.
//!
//! ```no_run
//! use filekv::host::{file_memory, HostConfig};
//! use filekv::Logger;
//!
//! let mut host = HostConfig::new(Logger::new("bot"));
//! host.apply(vec![file_memory("/tmp/bot.json")])?;
//!
//! let memory = host.memory().expect("memory installed");
//! memory.set("greeting", "hello")?;
//! # Ok::<(), filekv::FileKvError>(())
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{FileKvError, Result};
use crate::logger::Logger;
use crate::snapshot::Entries;
use crate::store::Store;

/// Storage backend contract a host calls into
pub trait Memory: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn delete(&self, key: &str) -> Result<bool>;

    fn keys(&self) -> Result<Vec<String>>;

    fn memories(&self) -> Result<Entries>;

    fn close(&self) -> Result<()>;
}

impl Memory for Store {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        Store::set(self, key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Store::get(self, key)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Store::delete(self, key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Store::keys(self)
    }

    fn memories(&self) -> Result<Entries> {
        Store::memories(self)
    }

    fn close(&self) -> Result<()> {
        Store::close(self)
    }
}

/// A configuration step applied to the host during bootstrap
pub type Module = Box<dyn FnOnce(&mut HostConfig) -> Result<()>>;

/// Host-side wiring: root logger plus the active memory backend
pub struct HostConfig {
    logger: Logger,
    memory: Option<Arc<dyn Memory>>,
}

impl HostConfig {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            memory: None,
        }
    }

    /// Derive a named sub-logger for a component
    pub fn logger(&self, name: &str) -> Logger {
        self.logger.named(name)
    }

    /// Install `memory` as the active backend, replacing any previous one
    pub fn set_memory(&mut self, memory: Arc<dyn Memory>) {
        self.memory = Some(memory);
    }

    /// The active backend, if one was installed
    pub fn memory(&self) -> Option<Arc<dyn Memory>> {
        self.memory.clone()
    }

    /// Apply modules in order, stopping at the first failure
    pub fn apply(&mut self, modules: Vec<Module>) -> Result<()> {
        for module in modules {
            module(self)?;
        }
        Ok(())
    }

    /// The installed backend, or a host error if none was configured
    pub fn require_memory(&self) -> Result<Arc<dyn Memory>> {
        self.memory()
            .ok_or_else(|| FileKvError::Host("no memory backend configured".to_string()))
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new(Logger::disabled())
    }
}

/// Module that opens a file-backed store at `path` and installs it as the
/// host's memory
///
/// If a file already exists at `path` it is loaded; an unreadable or
/// undecodable file makes `HostConfig::apply` fail.
pub fn file_memory(path: impl Into<PathBuf>) -> Module {
    let path = path.into();
    Box::new(move |host: &mut HostConfig| {
        let config = Config::builder()
            .path(path)
            .logger(host.logger("memory"))
            .build();

        let store = Store::open(config)?;
        host.set_memory(Arc::new(store));
        Ok(())
    })
}
