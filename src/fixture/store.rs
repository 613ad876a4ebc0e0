//! Fixture store
//!
//! Holds the fixture table of one feature at a time. The table is loaded
//! on first use and replaced when a different feature is opened.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use super::encoder::Format;
use super::gold::Gold;
use crate::common::paths::{ensure_dir, find_fixture};
use crate::common::{update_mode, Config, Error, Result};

/// Context title → ordered fixture records, in file order
pub type FixtureTable = IndexMap<String, Vec<Gold>>;

/// The table currently resident in a store
#[derive(Debug)]
struct Loaded {
    stem: String,
    path: PathBuf,
    format: Format,
    table: FixtureTable,
}

/// Lazily loaded, per-feature fixture tables
#[derive(Debug)]
pub struct FixtureStore {
    data_dir: PathBuf,
    suffix: String,
    update: bool,
    loaded: Option<Loaded>,
}

impl FixtureStore {
    /// Create a store reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>, suffix: impl Into<String>, update: bool) -> Self {
        Self {
            data_dir: data_dir.into(),
            suffix: suffix.into(),
            update,
            loaded: None,
        }
    }

    /// Create a store from configuration and the process update flag
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_dir, &config.suffix, update_mode())
    }

    /// Whether records may be rewritten and persisted
    pub fn is_updating(&self) -> bool {
        self.update
    }

    /// Directory holding the fixture files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the resident fixture file, if one is loaded
    pub fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    /// Records stored for `context` in the fixture file of feature `stem`
    ///
    /// `Ok(None)` means the file has no entry for this context: there is
    /// nothing to run, which is not an error.
    pub fn open(&mut self, stem: &str, context: &str) -> Result<Option<&[Gold]>> {
        let stale = self.loaded.as_ref().map_or(true, |l| l.stem != stem);
        if stale {
            if let Some(old) = self.loaded.take() {
                debug!(from = %old.stem, to = %stem, "switching fixture feature");
            }
            self.loaded = Some(self.load(stem)?);
        }

        Ok(self
            .loaded
            .as_ref()
            .and_then(|l| l.table.get(context))
            .map(Vec::as_slice))
    }

    fn load(&self, stem: &str) -> Result<Loaded> {
        let path = find_fixture(&self.data_dir, stem, &self.suffix)
            .ok_or_else(|| Error::fixture_not_found(stem, &self.data_dir))?;
        let (format, mut table) = read_table(&path)?;

        for gold in table.values_mut().flatten() {
            gold.bind(format, self.update);
        }

        debug!(
            path = %path.display(),
            contexts = table.len(),
            "loaded fixture table"
        );

        Ok(Loaded {
            stem: stem.to_string(),
            path,
            format,
            table,
        })
    }

    /// Write the resident table back to its file, in update mode only
    ///
    /// The whole file is replaced. Returns whether anything was written.
    pub fn flush(&self) -> Result<bool> {
        let Some(loaded) = self.loaded.as_ref().filter(|_| self.update) else {
            return Ok(false);
        };

        write_table(&loaded.path, loaded.format, &loaded.table)?;
        info!(path = %loaded.path.display(), "updated fixture file");
        Ok(true)
    }
}

/// Read and decode a fixture file, choosing the format by extension
pub fn read_table(path: &Path) -> Result<(Format, FixtureTable)> {
    let format = Format::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| Error::file_read(path, &e))?;
    let table = format
        .decode(&bytes)
        .map_err(|e| Error::fixture_parse(path, &e))?;
    Ok((format, table))
}

/// Encode a fixture table and replace the file at `path`
///
/// The parent directory is created when missing.
pub fn write_table(path: &Path, format: Format, table: &FixtureTable) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        ensure_dir(dir)?;
    }
    let bytes = format.encode(table)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
