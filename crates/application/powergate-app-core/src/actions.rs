use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

use powergate_core::PowerAction;

use crate::app_core::GateEvent;
use crate::ports::SystemRpc;

/// Power controls handed to the application while the backend is running.
///
/// Obtained from [`PowerKernel::actions`](crate::PowerKernel::actions), which
/// only returns one while the gate renders its children.
pub struct PowerActions<R> {
    rpc: Arc<R>,
    tx: mpsc::Sender<GateEvent>,
    runtime: Handle,
}

impl<R> Clone for PowerActions<R> {
    fn clone(&self) -> Self {
        Self {
            rpc: self.rpc.clone(),
            tx: self.tx.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<R: SystemRpc> PowerActions<R> {
    pub(crate) fn new(rpc: Arc<R>, tx: mpsc::Sender<GateEvent>, runtime: Handle) -> Self {
        Self { rpc, tx, runtime }
    }

    pub fn restart(&self) {
        self.request(PowerAction::Restart);
    }

    pub fn shutdown(&self) {
        self.request(PowerAction::Shutdown);
    }

    pub fn request(&self, action: PowerAction) {
        // Queued ahead of the mutation's own result, so `triggered` is set
        // before the call can resolve.
        if let Err(e) = self.tx.try_send(GateEvent::ActionRequested(action)) {
            warn!("Dropping {action} request, gate queue unavailable: {e}");
            return;
        }
        info!("Requesting backend {action}");

        let rpc = self.rpc.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let res = match action {
                PowerAction::Restart => rpc.restart().await,
                PowerAction::Shutdown => rpc.shutdown().await,
            };

            let ev = match res {
                Ok(()) => GateEvent::ActionSucceeded(action),
                Err(e) => {
                    warn!("Backend {action} request failed: {e}");
                    GateEvent::ActionFailed {
                        action,
                        message: e.to_string(),
                        rejected: e.is_rejection(),
                    }
                }
            };
            let _ = tx.send(ev).await;
        });
    }
}
