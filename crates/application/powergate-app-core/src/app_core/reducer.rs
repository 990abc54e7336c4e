use std::time::Duration;

use powergate_config::{REAUTH_DELAY_MS, ROOT_PATH, SHUTDOWN_COMPLETE_AFTER_MS};
use powergate_core::SystemStatus;

use crate::domain::GateState;

use super::effects::{GateEffect, QueryScope};
use super::events::{GateEvent, ProbeResult};

/// Next state plus the side effects the kernel must run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GateState,
    pub effects: Vec<GateEffect>,
}

pub fn reduce(mut state: GateState, ev: GateEvent) -> Transition {
    let mut effects = Vec::new();

    match ev {
        GateEvent::StatusProbe { run_id: _, probe } => match probe {
            ProbeResult::Observed { status, at } => {
                state.probe.failure_count = 0;
                state.probe.last_error = None;
                state.probe.last_success_at = Some(at);
                if state.status.as_ref() != Some(&status) {
                    if let Some(current) = state.status.take() {
                        state.previous_status = Some(current);
                    }
                    state.status = Some(status);
                }
            }
            ProbeResult::Failed { message } => {
                state.probe.failure_count = state.probe.failure_count.saturating_add(1);
                state.probe.last_error = Some(message.clone());
                if !state.flags.triggered {
                    effects.push(GateEffect::RaiseStatusError(message));
                }
            }
        },

        GateEvent::ActionRequested(_) => {
            state.flags.triggered = true;
            state.action_error = None;
        }

        GateEvent::ActionSucceeded(_) => {
            effects.push(GateEffect::CancelQueries(QueryScope::Status));
        }

        GateEvent::ActionFailed {
            action,
            message,
            rejected,
        } => {
            // A transport failure may just be the backend dropping the
            // connection on its way down, so the transition stays armed.
            if rejected {
                state.flags.triggered = false;
            }
            state.action_error = Some(format!("{action} failed: {message}"));
        }

        GateEvent::ActionErrorDismissed => state.action_error = None,

        GateEvent::ShutdownTimerElapsed { .. } => {
            if state.flags.start_shutdown_timer {
                state.flags.shutdown_complete = true;
            }
        }

        GateEvent::ReauthDelayElapsed { .. } => {
            if state.flags.reauth_pending {
                state.flags.reauth_pending = false;
                effects.push(GateEffect::CancelQueries(QueryScope::All));
                effects.push(GateEffect::ClearAuthToken);
                effects.push(GateEffect::Navigate(ROOT_PATH.to_string()));
            }
        }

        GateEvent::SessionReset {
            should_logout_on_running,
        } => {
            state = GateState::restored(should_logout_on_running);
        }
    }

    run_coordinators(&mut state, &mut effects);

    Transition { state, effects }
}

/// Rules that re-evaluate after every event.
fn run_coordinators(state: &mut GateState, effects: &mut Vec<GateEffect>) {
    let is_shutting_down = matches!(state.status, Some(SystemStatus::ShuttingDown));
    if is_shutting_down && state.probe.is_failing() && !state.flags.start_shutdown_timer {
        state.flags.start_shutdown_timer = true;
        effects.push(GateEffect::StartShutdownTimer(Duration::from_millis(
            SHUTDOWN_COMPLETE_AFTER_MS,
        )));
    }

    let transition_started = state.status.as_ref().is_some_and(|s| !s.is_running());
    if transition_started && state.flags.triggered && !state.flags.should_logout_on_running {
        state.flags.should_logout_on_running = true;
        effects.push(GateEffect::PersistLogoutFlag(true));
    }

    let is_running = state.status.as_ref().is_some_and(SystemStatus::is_running);
    if is_running && state.flags.should_logout_on_running {
        state.flags.should_logout_on_running = false;
        state.flags.reauth_pending = true;
        effects.push(GateEffect::PersistLogoutFlag(false));
        effects.push(GateEffect::ScheduleReauth(Duration::from_millis(
            REAUTH_DELAY_MS,
        )));
    }
}
