//! Small JSON-file key-value store for client state that must survive a
//! restart of the client (logout flag, auth token).

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

use crate::fs::atomic_write;

const QUALIFIER: &str = "com";
const ORG: &str = "powergate";
const APP: &str = "client";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Per-user config directory, created on first use.
pub fn config_dir() -> Result<Utf8PathBuf, StoreError> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StoreError::NoConfigDir)?;
    let dir = Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf())
        .map_err(|p| StoreError::InvalidPath(p.to_string_lossy().into_owned()))?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[derive(Debug, Clone)]
pub struct FileKvStore {
    path: Utf8PathBuf,
}

impl FileKvStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut map = self.load_map()?;
        match map.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut map = self.load_map()?;
        map.insert(key.to_owned(), serde_json::to_value(value)?);
        self.save_map(&map)?;
        debug!(key, path = %self.path, "stored value");
        Ok(())
    }

    /// Returns whether the key was present.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut map = self.load_map()?;
        let existed = map.remove(key).is_some();
        if existed {
            self.save_map(&map)?;
            debug!(key, path = %self.path, "removed value");
        }
        Ok(existed)
    }

    fn load_map(&self) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save_map(&self, map: &BTreeMap<String, serde_json::Value>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(map)?;
        atomic_write(&self.path, json.as_bytes())?;
        Ok(())
    }
}
