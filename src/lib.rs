//! # filekv
//!
//! A minimal durable key-value store, meant to be embedded in a host
//! application as its storage backend:
//! - String keys and values held in memory
//! - Every mutation rewrites a single JSON snapshot file
//! - Snapshot loaded back on open, so state survives restarts
//! - One reader/writer lock, safe for concurrent callers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Host Application                        │
//! │              (HostConfig + Memory trait)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                │
//! │          RwLock<Open(BTreeMap) | Closed>                    │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │ open                             │ set / delete
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │ SnapshotReader  │                │ SnapshotWriter  │
//!   │   (decode)      │                │ (full rewrite)  │
//!   └────────┬────────┘                └────────┬────────┘
//!            └──────────────┬───────────────────┘
//!                           ▼
//!                  ┌─────────────────┐
//!                  │   file.json     │
//!                  └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filekv::Store;
//!
//! let store = Store::open_path("/tmp/filekv.json")?;
//! store.set("foo", "bar")?;
//! assert_eq!(store.get("foo")?, Some("bar".to_string()));
//! store.close()?;
//! # Ok::<(), filekv::FileKvError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logger;

pub mod snapshot;
pub mod store;
pub mod host;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FileKvError, Result};
pub use config::{Config, PersistMode};
pub use logger::Logger;
pub use store::Store;
pub use host::{file_memory, HostConfig, Memory};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of filekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
