use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use powergate_core::SystemStatus;

fn default_backend_url() -> String {
    powergate_config::DEFAULT_BACKEND_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    powergate_config::DEFAULT_POLL_INTERVAL_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSettings {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl GateSettings {
    pub fn default_poll_interval(&self) -> Duration {
        Duration::from_millis(powergate_config::clamp_poll_interval_ms(
            self.poll_interval_ms,
        ))
    }
}

/// Flags threaded through one restart/shutdown cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionFlags {
    /// This session requested a restart or shutdown.
    pub triggered: bool,
    /// A logout is owed once the backend reports `running` again. Persisted.
    pub should_logout_on_running: bool,
    pub start_shutdown_timer: bool,
    pub shutdown_complete: bool,
    /// The delayed logout has been scheduled and not yet performed.
    pub reauth_pending: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeHealth {
    /// Consecutive failed probes; reset by a successful one.
    pub failure_count: u32,
    pub last_error: Option<String>,
    pub last_success_at: Option<DateTime<Utc>>,
}

impl ProbeHealth {
    pub fn is_failing(&self) -> bool {
        self.last_error.is_some() || self.failure_count > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateState {
    /// `None` until the first probe succeeds.
    pub status: Option<SystemStatus>,
    /// Last distinct status seen before `status`.
    pub previous_status: Option<SystemStatus>,
    pub flags: TransitionFlags,
    pub probe: ProbeHealth,
    /// Most recent failed restart/shutdown request, shown to the user.
    pub action_error: Option<String>,
}

impl GateState {
    /// Fresh session state, carrying over the persisted logout flag.
    pub fn restored(should_logout_on_running: bool) -> Self {
        Self {
            flags: TransitionFlags {
                should_logout_on_running,
                ..TransitionFlags::default()
            },
            ..Self::default()
        }
    }

    pub fn poll_interval(&self, default: Duration) -> Duration {
        if self.flags.triggered {
            Duration::from_millis(powergate_config::TRIGGERED_POLL_INTERVAL_MS)
        } else {
            default
        }
    }

    /// Status the gate renders from. While a triggered transition is in
    /// flight a transient `running` keeps showing the previous screen.
    pub fn status_to_show(&self) -> Option<&SystemStatus> {
        match &self.status {
            Some(SystemStatus::Running) if self.flags.triggered => self.previous_status.as_ref(),
            other => other.as_ref(),
        }
    }
}
