use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::GateState;

use super::effects::GateEffect;
use super::events::GateEvent;
use super::reducer::reduce;

#[derive(Clone, Default)]
pub struct GateStore {
    inner: Arc<Mutex<GateState>>,
}

impl GateStore {
    pub fn new(state: GateState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> GateState {
        self.lock().clone()
    }

    /// Reduce `ev` into the stored state and hand back the effects to run.
    pub fn apply(&self, ev: GateEvent) -> Vec<GateEffect> {
        let mut guard = self.lock();
        let transition = reduce(guard.clone(), ev);
        *guard = transition.state;
        transition.effects
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&GateState) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        // Replaced wholesale on every apply; a poisoned value is still whole.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
