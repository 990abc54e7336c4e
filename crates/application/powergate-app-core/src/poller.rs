use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::app_core::{GateEvent, GateStore, ProbeResult};
use crate::ports::SystemRpc;

/// Generation tag of status requests. Cancelling queries starts a new one and
/// the kernel drops results that carry an older id.
pub type PollRunId = Uuid;

struct PollRun {
    id: PollRunId,
    token: CancellationToken,
}

impl PollRun {
    fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            token: CancellationToken::new(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct QueryControl {
    inner: Arc<Mutex<PollRun>>,
}

impl QueryControl {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(PollRun::fresh())),
        }
    }

    pub(crate) fn current(&self) -> (PollRunId, CancellationToken) {
        let guard = self.lock();
        (guard.id, guard.token.clone())
    }

    pub(crate) fn current_id(&self) -> PollRunId {
        self.lock().id
    }

    /// Abort the in-flight request and start a new generation.
    pub(crate) fn cancel(&self) -> PollRunId {
        let mut guard = self.lock();
        guard.token.cancel();
        *guard = PollRun::fresh();
        guard.id
    }

    fn lock(&self) -> MutexGuard<'_, PollRun> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub(crate) struct StatusPoller<R> {
    pub(crate) rpc: Arc<R>,
    pub(crate) store: GateStore,
    pub(crate) queries: QueryControl,
    pub(crate) tx: mpsc::Sender<GateEvent>,
    pub(crate) default_interval: Duration,
    pub(crate) wake: Arc<Notify>,
}

impl<R: SystemRpc> StatusPoller<R> {
    pub(crate) async fn run(self) {
        loop {
            let started = Instant::now();
            let (run_id, token) = self.queries.current();

            let outcome = tokio::select! {
                _ = token.cancelled() => None,
                res = self.rpc.status() => Some(res),
            };

            match outcome {
                Some(res) => {
                    let probe = match res {
                        Ok(status) => ProbeResult::Observed {
                            status,
                            at: Utc::now(),
                        },
                        Err(e) => ProbeResult::Failed {
                            message: e.to_string(),
                        },
                    };
                    if self
                        .tx
                        .send(GateEvent::StatusProbe { run_id, probe })
                        .await
                        .is_err()
                    {
                        debug!("gate kernel dropped, stopping status poller");
                        return;
                    }
                }
                None => debug!(%run_id, "status query cancelled"),
            }

            self.wait_next_cycle(started).await;
        }
    }

    /// Sleep until the current interval has passed since the cycle started.
    /// A wake-up re-reads the interval, so triggering shortens a pending wait.
    async fn wait_next_cycle(&self, started: Instant) {
        loop {
            let interval = self
                .store
                .with_state(|s| s.poll_interval(self.default_interval));
            tokio::select! {
                _ = tokio::time::sleep_until(started + interval) => return,
                _ = self.wake.notified() => continue,
            }
        }
    }
}
