//! Snapshot Module
//!
//! The on-disk image of a store: one JSON object holding every entry.
//!
//! ## Responsibilities
//! - Load an existing snapshot at startup (missing file = empty map)
//! - Rewrite the whole snapshot after every mutation
//! - Keep encode failures distinct from flush failures
//!
//! ## File Format
//! ```text
//! {"foo":"bar","foo2":"foo2 value"}\n
//! ```
//! UTF-8, string keys, string values, no envelope or checksum. Keys are
//! written in sorted order so identical maps produce identical files.

mod reader;
mod writer;

use std::collections::BTreeMap;

pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;

/// In-memory image of a snapshot
pub type Entries = BTreeMap<String, String>;

/// Permissions for newly created snapshot files (owner/group read-write)
pub const FILE_MODE: u32 = 0o660;

/// Suffix of the scratch file used by `PersistMode::AtomicReplace`
pub const TEMP_SUFFIX: &str = ".tmp";
