use chrono::{DateTime, Utc};

use crate::domain::{GateSettings, GateState};
use crate::gate::{gate_view, GateView};

fn format_last_seen(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.format("%H:%M:%S UTC").to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Busy,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderVm {
    pub backend_url: String,
    pub status_label: String,
    pub tone: Tone,
    pub probe_label: Option<String>,
    pub last_seen: Option<String>,
}

pub fn header_vm(state: &GateState, settings: &GateSettings) -> HeaderVm {
    let status_label = match &state.status {
        Some(status) => format!("STATUS: {}", status.as_str().to_uppercase()),
        None => "STATUS: UNKNOWN".to_owned(),
    };
    let tone = match gate_view(state) {
        GateView::Children => Tone::Ok,
        GateView::Checking | GateView::ShuttingDown | GateView::Restarting => Tone::Busy,
        GateView::ShutdownComplete => Tone::Warn,
        GateView::Unexpected(_) => Tone::Error,
    };
    let probe_label = state.probe.is_failing().then(|| {
        match state.probe.failure_count {
            1 => "1 FAILED PROBE".to_owned(),
            n => format!("{n} FAILED PROBES"),
        }
    });

    HeaderVm {
        backend_url: settings.backend_url.clone(),
        status_label,
        tone,
        probe_label,
        last_seen: format_last_seen(state.probe.last_success_at),
    }
}

/// Full-window screen shown instead of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverVm {
    pub title: String,
    pub detail: String,
    pub busy: bool,
}

pub fn cover_vm(view: &GateView) -> Option<CoverVm> {
    let (title, detail, busy) = match view {
        GateView::Children => return None,
        GateView::Checking => (
            "CHECKING",
            "Waiting for the backend to report its status.".to_owned(),
            true,
        ),
        GateView::ShuttingDown => (
            "SHUTTING DOWN",
            "The backend is shutting down. This window will update when it is off.".to_owned(),
            true,
        ),
        GateView::Restarting => (
            "RESTARTING",
            "The backend is restarting. You will be asked to sign in again.".to_owned(),
            true,
        ),
        GateView::ShutdownComplete => (
            "SHUTDOWN COMPLETE",
            "The backend has probably shut down. It is safe to power off the machine.".to_owned(),
            false,
        ),
        GateView::Unexpected(raw) => (
            "UNEXPECTED STATE",
            format!("The backend reported an unknown status: {raw}"),
            false,
        ),
    };
    Some(CoverVm {
        title: title.to_owned(),
        detail,
        busy,
    })
}
