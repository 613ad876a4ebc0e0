//! Configuration and fixture file paths
//!
//! Fixture files live under a data directory relative to the working
//! directory, named after the feature stem: `testdata/SumOperation.json`.

use std::io;
use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Name of the optional configuration file
const CONFIG_FILE: &str = "bdd.toml";

/// Extensions tried when the configured suffix finds no file
const FIXTURE_EXTENSIONS: [&str; 3] = ["json", "yml", "yaml"];

/// Get the path to the configuration file
pub fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Path a feature's fixture file gets when it is first written
pub fn fixture_path(data_dir: &Path, stem: &str, suffix: &str) -> PathBuf {
    data_dir.join(format!("{}{}", stem, suffix))
}

/// Find an existing fixture file for `stem`
///
/// The configured suffix wins; otherwise the first supported extension
/// with a matching file is used.
pub fn find_fixture(data_dir: &Path, stem: &str, suffix: &str) -> Option<PathBuf> {
    let preferred = fixture_path(data_dir, stem, suffix);
    if preferred.is_file() {
        return Some(preferred);
    }

    FIXTURE_EXTENSIONS
        .iter()
        .map(|ext| data_dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}

/// Ensure `dir` exists as a directory, creating it if absent
///
/// Fails with [`Error::DataDirIsFile`] when the path is taken by a file.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::DataDirIsFile(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            std::fs::create_dir_all(dir)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
