mod error;


pub use error::StoreError;

use crate::security::PathSanitizer;
use crate::sharder::{JobMatrix, VersionMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
struct OlderVersionsFile {
    older_versions: Vec<String>,
}

/// The directory holding harvest state and generated matrices
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Open a data directory, creating it when missing
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();

        if root.exists() && !root.is_dir() {
            return Err(StoreError::NotADirectory(root.display().to_string()));
        }
        if !root.is_dir() {
            fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
            info!(path = %root.display(), "created data directory");
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a file name inside the data directory
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let sanitized = PathSanitizer::sanitize(name)?;
        Ok(self.root.join(sanitized))
    }

    /// Older versions recorded by a previous run; empty when none exist yet
    pub fn load_older_versions(&self, name: &str) -> Result<BTreeSet<String>, StoreError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            debug!(path = %path.display(), "no older versions file");
            return Ok(BTreeSet::new());
        }

        let file: OlderVersionsFile = read_json(&path)?;
        Ok(file.older_versions.into_iter().collect())
    }

    pub fn save_older_versions(
        &self,
        name: &str,
        older_versions: &BTreeSet<String>,
    ) -> Result<PathBuf, StoreError> {
        let file = OlderVersionsFile {
            older_versions: older_versions.iter().cloned().collect(),
        };
        self.write(name, &file)
    }

    pub fn load_version_map(&self, name: &str) -> Result<VersionMap, StoreError> {
        read_json(&self.path_for(name)?)
    }

    pub fn save_version_map(&self, name: &str, map: &VersionMap) -> Result<PathBuf, StoreError> {
        self.write(name, map)
    }

    pub fn save_matrix(&self, name: &str, matrix: &JobMatrix) -> Result<PathBuf, StoreError> {
        self.write(name, matrix)
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        write_json(&path, value)?;
        Ok(path)
    }
}

/// Read a JSON document from an arbitrary path
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&contents).map_err(|e| StoreError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write a value as compact JSON, creating parent directories as needed
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let json = serde_json::to_string(value).map_err(|e| StoreError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| io_error(path, e))?;

    debug!(path = %path.display(), "wrote json");
    Ok(())
}

fn io_error(path: &Path, error: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
