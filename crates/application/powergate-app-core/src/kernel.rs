use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::actions::PowerActions;
use crate::app_core::{GateEffect, GateEvent, GateStore, SessionEpoch};
use crate::domain::{GateSettings, GateState};
use crate::error::GateError;
use crate::gate::{gate_view, GateView};
use crate::poller::{QueryControl, StatusPoller};
use crate::ports::{LogoutFlagStore, NavigatorPort, SessionPort, SystemRpc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelOptions {
    /// Poll period while no transition is in flight.
    pub default_poll_interval: Duration,
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self {
            default_poll_interval: Duration::from_millis(
                powergate_config::DEFAULT_POLL_INTERVAL_MS,
            ),
        }
    }
}

impl From<&GateSettings> for KernelOptions {
    fn from(settings: &GateSettings) -> Self {
        Self {
            default_poll_interval: settings.default_poll_interval(),
        }
    }
}

pub struct PowerKernel<R, F, S, N> {
    pub store: GateStore,
    rpc: Arc<R>,
    flags: Arc<F>,
    session: Arc<S>,
    navigator: Arc<N>,
    options: KernelOptions,

    runtime: Handle,
    queries: QueryControl,
    wake: Arc<Notify>,
    poller: Option<JoinHandle<()>>,
    epoch: SessionEpoch,

    tx: mpsc::Sender<GateEvent>,
    rx: mpsc::Receiver<GateEvent>,
}

impl<R, F, S, N> PowerKernel<R, F, S, N>
where
    R: SystemRpc,
    F: LogoutFlagStore,
    S: SessionPort,
    N: NavigatorPort,
{
    pub fn new(
        runtime: Handle,
        rpc: R,
        flags: F,
        session: S,
        navigator: N,
        options: KernelOptions,
    ) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let flags = Arc::new(flags);
        let restored = load_logout_flag(flags.as_ref());
        if restored {
            info!("Logout is owed from a previous session");
        }

        Self {
            store: GateStore::new(GateState::restored(restored)),
            rpc: Arc::new(rpc),
            flags,
            session: Arc::new(session),
            navigator: Arc::new(navigator),
            options,
            runtime,
            queries: QueryControl::new(),
            wake: Arc::new(Notify::new()),
            poller: None,
            epoch: 0,
            tx,
            rx,
        }
    }

    /// Spawn the status poller. Idempotent.
    pub fn start(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let poller = StatusPoller {
            rpc: self.rpc.clone(),
            store: self.store.clone(),
            queries: self.queries.clone(),
            tx: self.tx.clone(),
            default_interval: self.options.default_poll_interval,
            wake: self.wake.clone(),
        };
        debug!(
            interval_ms = self.options.default_poll_interval.as_millis() as u64,
            "starting status poller"
        );
        self.poller = Some(self.runtime.spawn(poller.run()));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }

    pub fn state(&self) -> GateState {
        self.store.state()
    }

    pub fn view(&self) -> GateView {
        self.store.with_state(gate_view)
    }

    /// Power controls, available only while the gate renders its children.
    pub fn actions(&self) -> Option<PowerActions<R>> {
        self.view().is_children().then(|| {
            PowerActions::new(self.rpc.clone(), self.tx.clone(), self.runtime.clone())
        })
    }

    pub fn dismiss_action_error(&mut self) {
        if let Err(e) = self.handle(GateEvent::ActionErrorDismissed) {
            warn!("Unexpected gate error while dismissing: {e}");
        }
    }

    /// Apply every queued event without blocking. Returns the first status
    /// error raised while draining.
    pub fn tick(&mut self) -> Result<(), GateError> {
        let mut first_err = None;
        while let Ok(ev) = self.rx.try_recv() {
            if let Err(e) = self.handle(ev) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Wait for the next event and apply it.
    pub async fn next_event(&mut self) -> Result<(), GateError> {
        match self.rx.recv().await {
            Some(ev) => self.handle(ev),
            None => Ok(()),
        }
    }

    pub fn sender(&self) -> mpsc::Sender<GateEvent> {
        self.tx.clone()
    }

    fn handle(&mut self, ev: GateEvent) -> Result<(), GateError> {
        match &ev {
            GateEvent::StatusProbe { run_id, .. } if *run_id != self.queries.current_id() => {
                debug!(%run_id, "ignoring status result from a cancelled query");
                return Ok(());
            }
            GateEvent::ShutdownTimerElapsed { epoch } | GateEvent::ReauthDelayElapsed { epoch }
                if *epoch != self.epoch =>
            {
                debug!(epoch, current = self.epoch, "ignoring timer from a previous session");
                return Ok(());
            }
            _ => {}
        }

        let wake_poller = matches!(ev, GateEvent::ActionRequested(_));
        let before = self.view();
        let effects = self.store.apply(ev);
        if wake_poller {
            self.wake.notify_one();
        }

        let after = self.view();
        if before != after {
            info!(from = ?before, to = ?after, "gate view changed");
        }

        self.run_effects(effects)
    }

    fn run_effects(&mut self, effects: Vec<GateEffect>) -> Result<(), GateError> {
        let mut raised = None;
        for effect in effects {
            if let Err(e) = self.run_effect(effect) {
                raised.get_or_insert(e);
            }
        }
        raised.map_or(Ok(()), Err)
    }

    fn run_effect(&mut self, effect: GateEffect) -> Result<(), GateError> {
        match effect {
            GateEffect::PersistLogoutFlag(value) => {
                debug!(value, "persisting logout flag");
                if let Err(e) = self.flags.save(value) {
                    warn!("Failed to persist logout flag: {e:#}");
                }
            }

            GateEffect::StartShutdownTimer(delay) => {
                info!(
                    secs = delay.as_secs(),
                    "status probe failing during shutdown, starting grace timer"
                );
                self.spawn_timer(delay, GateEvent::ShutdownTimerElapsed { epoch: self.epoch });
            }

            GateEffect::ScheduleReauth(delay) => {
                info!("Backend is running again, logging out shortly");
                self.spawn_timer(delay, GateEvent::ReauthDelayElapsed { epoch: self.epoch });
            }

            GateEffect::CancelQueries(scope) => {
                let run_id = self.queries.cancel();
                debug!(?scope, %run_id, "cancelled pending queries");
            }

            GateEffect::ClearAuthToken => {
                if let Err(e) = self.session.remove_token() {
                    warn!("Failed to clear auth token: {e:#}");
                }
            }

            GateEffect::Navigate(path) => {
                info!(%path, "navigating after forced logout");
                if let Err(e) = self.navigator.navigate(&path) {
                    warn!("Navigation to {path} failed: {e:#}");
                }
                self.epoch += 1;
                let restored = load_logout_flag(self.flags.as_ref());
                let effects = self.store.apply(GateEvent::SessionReset {
                    should_logout_on_running: restored,
                });
                return self.run_effects(effects);
            }

            GateEffect::RaiseStatusError(message) => {
                return Err(GateError::StatusUnavailable(message));
            }
        }
        Ok(())
    }

    fn spawn_timer(&self, delay: Duration, ev: GateEvent) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ev).await;
        });
    }
}

impl<R, F, S, N> Drop for PowerKernel<R, F, S, N> {
    fn drop(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }
}

fn load_logout_flag<F: LogoutFlagStore + ?Sized>(flags: &F) -> bool {
    match flags.load() {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read logout flag, assuming none owed: {e:#}");
            false
        }
    }
}
