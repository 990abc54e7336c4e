use chrono::{DateTime, Utc};

use powergate_core::{PowerAction, SystemStatus};

use crate::poller::PollRunId;

/// Counts session resets. Timers started in an earlier session carry a stale
/// epoch and are dropped by the kernel.
pub type SessionEpoch = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Observed {
        status: SystemStatus,
        at: DateTime<Utc>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    // StatusPoller
    StatusProbe {
        run_id: PollRunId,
        probe: ProbeResult,
    },

    // ActionDispatcher
    ActionRequested(PowerAction),
    ActionSucceeded(PowerAction),
    ActionFailed {
        action: PowerAction,
        message: String,
        /// The backend answered and refused, so no transition started.
        rejected: bool,
    },
    ActionErrorDismissed,

    // Timers
    ShutdownTimerElapsed { epoch: SessionEpoch },
    ReauthDelayElapsed { epoch: SessionEpoch },

    // Navigation reloaded the session
    SessionReset {
        should_logout_on_running: bool,
    },
}
