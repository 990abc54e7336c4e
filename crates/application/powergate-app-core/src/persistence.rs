use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;

use powergate_infra::fs::atomic_write;
use powergate_infra::kv::config_dir;
use powergate_infra::FileKvStore;

use crate::domain::GateSettings;

const SETTINGS_FILE: &str = "settings.json";

/// Settings and client state files, rooted in the per-user config
/// directory unless an explicit root is given.
#[derive(Debug, Clone, Default)]
pub struct FilePersistence {
    root: Option<Utf8PathBuf>,
}

impl FilePersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn config_dir(&self) -> Result<Utf8PathBuf> {
        match &self.root {
            Some(root) => {
                if !root.exists() {
                    fs::create_dir_all(root)
                        .with_context(|| format!("Failed to create {root}"))?;
                }
                Ok(root.clone())
            }
            None => config_dir().context("Could not determine config directory"),
        }
    }

    fn settings_path(&self) -> Result<Utf8PathBuf> {
        Ok(self.config_dir()?.join(SETTINGS_FILE))
    }

    pub fn state_store(&self) -> Result<FileKvStore> {
        Ok(FileKvStore::new(self.config_dir()?.join("state.json")))
    }

    pub fn load_settings(&self) -> Result<GateSettings> {
        let path = self.settings_path()?;
        if !path.exists() {
            return Ok(GateSettings::default());
        }
        let content = fs::read_to_string(&path).context("Failed to read settings")?;
        let settings: GateSettings =
            serde_json::from_str(&content).with_context(|| format!("Invalid settings in {path}"))?;
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &GateSettings) -> Result<()> {
        let path = self.settings_path()?;
        let json = serde_json::to_string_pretty(settings)?;
        atomic_write(&path, json.as_bytes()).context("Failed to write settings")?;
        Ok(())
    }
}
