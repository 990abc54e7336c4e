use powergate_core::SystemStatus;

use crate::domain::GateState;

/// What the client renders for a given gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
    /// First status probe still in flight.
    Checking,
    /// Backend is up; render the application and expose the power actions.
    Children,
    ShuttingDown,
    Restarting,
    /// Probe has been failing for the whole grace period after shutdown.
    ShutdownComplete,
    /// Status string this client does not know how to present.
    Unexpected(String),
}

impl GateView {
    pub fn is_children(&self) -> bool {
        matches!(self, GateView::Children)
    }
}

pub fn gate_view(state: &GateState) -> GateView {
    let Some(status) = &state.status else {
        return GateView::Checking;
    };

    if *status == SystemStatus::ShuttingDown && state.flags.shutdown_complete {
        return GateView::ShutdownComplete;
    }

    match state.status_to_show() {
        None | Some(SystemStatus::Running) => GateView::Children,
        Some(SystemStatus::ShuttingDown) => GateView::ShuttingDown,
        Some(SystemStatus::Restarting) => GateView::Restarting,
        Some(SystemStatus::Unknown(raw)) => GateView::Unexpected(raw.clone()),
    }
}
