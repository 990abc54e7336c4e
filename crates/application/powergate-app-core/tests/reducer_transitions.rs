use std::time::Duration;

use chrono::Utc;
use powergate_app_core::{
    reduce, GateEffect, GateEvent, GateState, PowerAction, ProbeResult, QueryScope, SystemStatus,
};

fn observed(status: SystemStatus) -> GateEvent {
    GateEvent::StatusProbe {
        run_id: uuid::Uuid::new_v4(),
        probe: ProbeResult::Observed {
            status,
            at: Utc::now(),
        },
    }
}

fn failed(message: &str) -> GateEvent {
    GateEvent::StatusProbe {
        run_id: uuid::Uuid::new_v4(),
        probe: ProbeResult::Failed {
            message: message.into(),
        },
    }
}

/// Fold events, collecting every effect along the way.
fn run(state: GateState, events: Vec<GateEvent>) -> (GateState, Vec<GateEffect>) {
    let mut all = Vec::new();
    let state = events.into_iter().fold(state, |state, ev| {
        let t = reduce(state, ev);
        all.extend(t.effects);
        t.state
    });
    (state, all)
}

#[test]
fn requesting_an_action_arms_fast_polling() {
    let default = Duration::from_secs(5);
    let (state, _) = run(GateState::default(), vec![observed(SystemStatus::Running)]);
    assert_eq!(state.poll_interval(default), default);

    let t = reduce(state, GateEvent::ActionRequested(PowerAction::Restart));
    assert!(t.state.flags.triggered);
    assert!(t.effects.is_empty());
    assert_eq!(t.state.poll_interval(default), Duration::from_millis(500));
}

#[test]
fn successful_action_cancels_the_status_query() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Shutdown),
        ],
    );
    let t = reduce(state, GateEvent::ActionSucceeded(PowerAction::Shutdown));
    assert_eq!(t.effects, vec![GateEffect::CancelQueries(QueryScope::Status)]);
}

#[test]
fn previous_status_tracks_the_last_distinct_value() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            observed(SystemStatus::Running),
            observed(SystemStatus::ShuttingDown),
            observed(SystemStatus::ShuttingDown),
        ],
    );
    assert_eq!(state.status, Some(SystemStatus::ShuttingDown));
    assert_eq!(state.previous_status, Some(SystemStatus::Running));
}

#[test]
fn transient_running_keeps_showing_the_previous_status() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Shutdown),
            observed(SystemStatus::ShuttingDown),
            observed(SystemStatus::Running),
        ],
    );
    assert_eq!(state.status, Some(SystemStatus::Running));
    assert_eq!(state.status_to_show(), Some(&SystemStatus::ShuttingDown));
}

#[test]
fn logout_is_owed_once_the_transition_has_started() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Restart),
        ],
    );
    assert!(!state.flags.should_logout_on_running);

    let t = reduce(state, observed(SystemStatus::Restarting));
    assert!(t.state.flags.should_logout_on_running);
    assert_eq!(t.effects, vec![GateEffect::PersistLogoutFlag(true)]);

    // Already recorded: not persisted again.
    let t = reduce(t.state, observed(SystemStatus::Restarting));
    assert!(t.effects.is_empty());
}

#[test]
fn untriggered_transition_does_not_owe_a_logout() {
    let (state, effects) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            observed(SystemStatus::Restarting),
        ],
    );
    assert!(!state.flags.should_logout_on_running);
    assert!(effects.is_empty());
}

#[test]
fn running_with_logout_owed_schedules_reauth_then_logs_out_once() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Restart),
            observed(SystemStatus::Restarting),
            failed("connection refused"),
        ],
    );

    let t = reduce(state, observed(SystemStatus::Running));
    assert!(!t.state.flags.should_logout_on_running);
    assert!(t.state.flags.reauth_pending);
    assert_eq!(
        t.effects,
        vec![
            GateEffect::PersistLogoutFlag(false),
            GateEffect::ScheduleReauth(Duration::from_secs(1)),
        ]
    );

    // More running probes during the delay do not reschedule.
    let t = reduce(t.state, observed(SystemStatus::Running));
    assert!(t.effects.is_empty());

    let t = reduce(t.state, GateEvent::ReauthDelayElapsed { epoch: 0 });
    assert_eq!(
        t.effects,
        vec![
            GateEffect::CancelQueries(QueryScope::All),
            GateEffect::ClearAuthToken,
            GateEffect::Navigate("/".into()),
        ]
    );

    // A duplicate timer firing is a no-op.
    let t = reduce(t.state, GateEvent::ReauthDelayElapsed { epoch: 0 });
    assert!(t.effects.is_empty());
}

#[test]
fn restored_flag_logs_out_on_first_running_probe() {
    let t = reduce(GateState::restored(true), observed(SystemStatus::Running));
    assert!(t
        .effects
        .contains(&GateEffect::ScheduleReauth(Duration::from_secs(1))));
}

#[test]
fn failing_probe_during_shutdown_starts_the_grace_timer_once() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Shutdown),
            observed(SystemStatus::ShuttingDown),
        ],
    );
    assert!(!state.flags.start_shutdown_timer);

    let t = reduce(state, failed("connection refused"));
    assert!(t.state.flags.start_shutdown_timer);
    assert_eq!(
        t.effects,
        vec![GateEffect::StartShutdownTimer(Duration::from_secs(30))]
    );
    assert_eq!(t.state.probe.failure_count, 1);
    assert_eq!(
        t.state.status,
        Some(SystemStatus::ShuttingDown),
        "last known status is kept while the probe fails"
    );

    let t = reduce(t.state, failed("connection refused"));
    assert!(t.effects.is_empty());
    assert_eq!(t.state.probe.failure_count, 2);

    let t = reduce(t.state, GateEvent::ShutdownTimerElapsed { epoch: 0 });
    assert!(t.state.flags.shutdown_complete);
}

#[test]
fn grace_timer_without_a_started_timer_is_ignored() {
    let (state, _) = run(GateState::default(), vec![observed(SystemStatus::ShuttingDown)]);
    let t = reduce(state, GateEvent::ShutdownTimerElapsed { epoch: 0 });
    assert!(!t.state.flags.shutdown_complete);
}

#[test]
fn probe_failure_without_trigger_is_raised() {
    let (state, _) = run(GateState::default(), vec![observed(SystemStatus::Running)]);
    let t = reduce(state, failed("connection refused"));
    assert_eq!(
        t.effects,
        vec![GateEffect::RaiseStatusError("connection refused".into())]
    );
}

#[test]
fn probe_failure_while_triggered_is_expected() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Restart),
        ],
    );
    let t = reduce(state, failed("connection refused"));
    assert!(t.effects.is_empty());
}

#[test]
fn successful_probe_resets_failure_count() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Restart),
            failed("timeout"),
            failed("timeout"),
            observed(SystemStatus::Restarting),
        ],
    );
    assert_eq!(state.probe.failure_count, 0);
    assert_eq!(state.probe.last_error, None);
    assert!(state.probe.last_success_at.is_some());
}

#[test]
fn rejected_action_disarms_the_transition() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Shutdown),
            GateEvent::ActionFailed {
                action: PowerAction::Shutdown,
                message: "admin only".into(),
                rejected: true,
            },
        ],
    );
    assert!(!state.flags.triggered);
    assert_eq!(state.action_error.as_deref(), Some("shutdown failed: admin only"));

    let t = reduce(state, GateEvent::ActionErrorDismissed);
    assert_eq!(t.state.action_error, None);
}

#[test]
fn transport_failure_keeps_the_transition_armed() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Restart),
            GateEvent::ActionFailed {
                action: PowerAction::Restart,
                message: "connection reset".into(),
                rejected: false,
            },
        ],
    );
    assert!(state.flags.triggered);
    assert!(state.action_error.is_some());
}

#[test]
fn session_reset_keeps_only_the_persisted_flag() {
    let (state, _) = run(
        GateState::default(),
        vec![
            observed(SystemStatus::Running),
            GateEvent::ActionRequested(PowerAction::Restart),
            observed(SystemStatus::Restarting),
        ],
    );
    let t = reduce(
        state,
        GateEvent::SessionReset {
            should_logout_on_running: false,
        },
    );
    assert_eq!(t.state, GateState::default());
    assert!(t.effects.is_empty());
}
