//! # Storage Layer
//!
//! Every fetched entry is written to two flat files that are meant to mirror
//! each other, keyed by APOD date:
//!
//! ```text
//! <data dir>/
//! ├── output.jsonl          # line store: one JSON object per line
//! ├── output.csv            # table store: header row + one row per entry
//! ├── user_settings.jsonl   # settings sidecar (see settings.rs)
//! └── downloads/            # saved media files
//! ```
//!
//! The [`LogStore`] trait exposes only whole-file primitives (load, append one,
//! rewrite all). Neither format supports deleting or patching a row in place,
//! so higher-level operations in `commands/` load the full store first and
//! only then write, and rewrites go to a temp file that is renamed over the
//! original.
//!
//! ## Implementations
//!
//! - [`lines::JsonlStore`]: the line store
//! - [`table::CsvStore`]: the table store
//! - [`memory::InMemoryStore`]: no persistence, for tests

use crate::error::{ApodError, Result};
use crate::model::ApodRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use uuid::Uuid;

pub mod lines;
pub mod memory;
pub mod table;

/// Whole-file access to one log.
pub trait LogStore {
    /// Short name used in user-facing messages, e.g. `output.jsonl`.
    fn label(&self) -> &str;

    fn exists(&self) -> bool;

    /// Create an empty store. Returns `false` when it already existed.
    fn create(&mut self) -> Result<bool>;

    /// All records in file order.
    fn load(&self) -> Result<Vec<ApodRecord>>;

    /// Append exactly one record at the end.
    fn append(&mut self, record: &ApodRecord) -> Result<()>;

    /// Replace the whole content with `records`.
    fn rewrite(&mut self, records: &[ApodRecord]) -> Result<()>;
}

/// Which of the two logs a read should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Lines,
    Table,
}

/// The line store and the table store, updated together.
pub struct LogPair<L: LogStore, T: LogStore> {
    pub lines: L,
    pub table: T,
}

impl<L: LogStore, T: LogStore> LogPair<L, T> {
    pub fn new(lines: L, table: T) -> Self {
        Self { lines, table }
    }

    pub fn get(&self, kind: StoreKind) -> &dyn LogStore {
        match kind {
            StoreKind::Lines => &self.lines,
            StoreKind::Table => &self.table,
        }
    }

    pub fn both(&self) -> [&dyn LogStore; 2] {
        [&self.lines, &self.table]
    }

    pub fn both_mut(&mut self) -> [&mut dyn LogStore; 2] {
        [&mut self.lines, &mut self.table]
    }
}

/// Writes `content` next to `target` and renames it into place.
pub(crate) fn replace_file(target: &Path, content: &[u8]) -> Result<()> {
    let dir = target
        .parent()
        .ok_or_else(|| ApodError::Store(format!("No parent directory for {}", target.display())))?;
    let stem = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());

    let tmp_file = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
    fs::write(&tmp_file, content).map_err(ApodError::Io)?;
    fs::rename(&tmp_file, target).map_err(ApodError::Io)?;
    Ok(())
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(ApodError::Io)?;
        }
    }
    Ok(())
}

/// Opens `path` for appending. A last line cut off without its newline gets
/// one first, so the next record starts on a line of its own.
pub(crate) fn open_for_append(path: &Path) -> Result<File> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(ApodError::Io)?;

    if file.metadata().map_err(ApodError::Io)?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(ApodError::Io)?;
        file.read_exact(&mut last).map_err(ApodError::Io)?;
        if last[0] != b'\n' {
            file.write_all(b"\n").map_err(ApodError::Io)?;
        }
    }
    Ok(file)
}
