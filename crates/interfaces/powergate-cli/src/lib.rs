pub mod commands;
pub mod session;

use anyhow::Result;
use camino::Utf8PathBuf;
use powergate_app_core::persistence::FilePersistence;
use powergate_app_core::GateSettings;

/// Values given on the command line, layered over the saved settings.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_dir: Option<Utf8PathBuf>,
    pub url: Option<String>,
    pub interval_ms: Option<u64>,
}

impl Overrides {
    pub fn persistence(&self) -> FilePersistence {
        match &self.config_dir {
            Some(dir) => FilePersistence::at(dir.clone()),
            None => FilePersistence::new(),
        }
    }

    pub fn settings(&self, persistence: &FilePersistence) -> Result<GateSettings> {
        let mut settings = persistence.load_settings()?;
        if let Some(url) = &self.url {
            settings.backend_url = url.clone();
        }
        if let Some(ms) = self.interval_ms {
            settings.poll_interval_ms = powergate_config::clamp_poll_interval_ms(ms);
        }
        Ok(settings)
    }
}

/// How a watched gate finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The session was reset after the backend came back.
    LoggedOut,
    /// The backend stopped answering after a shutdown.
    ShutdownComplete,
}
