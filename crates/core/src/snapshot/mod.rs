//! Snapshot input contract.
//!
//! A snapshot is the full set of domain records the reporting engine
//! computes over, together with the report window. The data-access layer
//! that assembles snapshots from storage is outside this crate; it plugs in
//! through [`SnapshotSource`]. Lists need not be pre-filtered by date - the
//! engine applies its own window filtering to every time-scoped input.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use worklane_shared::AppError;

use crate::domain::{Assignment, Bonus, Project, TimeEntry, User};
use crate::period::ReportWindow;

/// Errors from loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot file could not be read.
    #[error("failed to read snapshot file {path}: {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot payload is not valid JSON for the expected shape.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        Self::Snapshot(err.to_string())
    }
}

/// The domain record sets a snapshot carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecords {
    /// All users.
    #[serde(default)]
    pub users: Vec<User>,
    /// All projects, each carrying its client display name.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// All user-project assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Time entries; the engine keeps only approved ones inside the window.
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
    /// Bonuses; the engine gates tagged ones by the window's months.
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

/// A consistent view of the system for one report window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    /// The inclusive date window being reported.
    pub window: ReportWindow,
    /// The domain records to compute over.
    pub records: SnapshotRecords,
}

/// Seam for the (out-of-scope) data-access layer that assembles snapshots.
pub trait SnapshotSource {
    /// Loads a snapshot scoped to the given window.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` when the snapshot cannot be produced.
    fn load(&self, window: ReportWindow) -> Result<ReportSnapshot, SnapshotError>;
}

/// Snapshot source reading a whole-system JSON export from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source for the given snapshot file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self, window: ReportWindow) -> Result<ReportSnapshot, SnapshotError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SnapshotError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let records: SnapshotRecords = serde_json::from_str(&raw)?;
        Ok(ReportSnapshot { window, records })
    }
}
