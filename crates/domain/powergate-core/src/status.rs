use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend lifecycle phase as reported by `system.status`.
///
/// The wire form is a kebab-case string. Values this client does not know
/// about decode to [`SystemStatus::Unknown`] so a newer backend can never make
/// the status probe itself fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SystemStatus {
    Running,
    ShuttingDown,
    Restarting,
    Unknown(String),
}

impl SystemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SystemStatus::Running => "running",
            SystemStatus::ShuttingDown => "shutting-down",
            SystemStatus::Restarting => "restarting",
            SystemStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SystemStatus::Running)
    }
}

impl From<&str> for SystemStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "running" => SystemStatus::Running,
            "shutting-down" => SystemStatus::ShuttingDown,
            "restarting" => SystemStatus::Restarting,
            other => SystemStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SystemStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "running" | "shutting-down" | "restarting" => SystemStatus::from(raw.as_str()),
            _ => SystemStatus::Unknown(raw),
        }
    }
}

impl From<SystemStatus> for String {
    fn from(status: SystemStatus) -> Self {
        match status {
            SystemStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
