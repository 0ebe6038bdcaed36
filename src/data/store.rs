use std::path::{Path, PathBuf};

use crate::error::DataLoadError;

use super::loader;
use super::model::Table;

// ---------------------------------------------------------------------------
// Data store: owns the one table every chart reads
// ---------------------------------------------------------------------------

/// Holds the loaded table and where it came from.
#[derive(Debug, Clone, Default)]
pub struct InsuranceStore {
    table: Table,
    source: Option<PathBuf>,
}

impl InsuranceStore {
    /// Read `path` into a fresh store.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let table = loader::load_table(path)?;
        log::info!(
            "Loaded {} records from {} (regions: {:?})",
            table.len(),
            path.display(),
            table.regions()
        );
        Ok(Self {
            table,
            source: Some(path.to_path_buf()),
        })
    }

    /// Rename `yes`/`no` in the smoker column to `smoker`/`nonsmoker`.
    pub fn relabel_smoker(&mut self) {
        let changed = self.table.relabel_smoker();
        log::info!("Relabeled {changed} smoker values");
    }

    /// The current table.
    pub fn data(&self) -> &Table {
        &self.table
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl InsuranceStore {
    /// Wrap an already-built table (no source file).
    pub(crate) fn new(table: Table) -> Self {
        Self {
            table,
            source: None,
        }
    }
}
