//! Run identifiers and run directories
//!
//! Every invocation gets a scratch directory named after the current time in
//! milliseconds, holding the patched copy of the source workbook. Run
//! directories are never cleaned up.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Source of run identifiers
pub trait RunClock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl RunClock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl RunClock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// A created `<base>/<millis>` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    id: i64,
    path: PathBuf,
}

impl RunDirectory {
    /// Create the run directory for the clock's current instant under `base`.
    ///
    /// `base` is created if missing. Fails with [`Error::RunDirectoryExists`]
    /// when a run with the same millisecond already exists.
    pub fn create<C: RunClock + ?Sized>(base: &Path, clock: &C) -> Result<Self> {
        let id = clock.now_millis();
        let path = base.join(id.to_string());

        std::fs::create_dir_all(base)?;
        match std::fs::create_dir(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::RunDirectoryExists(path));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(run = id, path = %path.display(), "created run directory");
        Ok(Self { id, path })
    }

    /// Millisecond timestamp naming this run
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the patched copy of `source` lives inside this run
    pub fn workbook_path(&self, source: &Path) -> PathBuf {
        match source.file_name() {
            Some(name) => self.path.join(name),
            None => self.path.join("workbook.xlsx"),
        }
    }
}
