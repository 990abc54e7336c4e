//! Port implementations backed by `powergate-infra`.

use std::sync::{Arc, Mutex};

use anyhow::Context;
use powergate_config::{AUTH_TOKEN_KEY, LOGOUT_FLAG_KEY};
use powergate_core::{RpcError, SystemStatus};
use powergate_infra::{FileKvStore, HttpSystemClient};

use crate::ports::{LogoutFlagStore, NavigatorPort, SessionPort, SystemRpc};

#[async_trait::async_trait]
impl SystemRpc for HttpSystemClient {
    async fn status(&self) -> Result<SystemStatus, RpcError> {
        HttpSystemClient::status(self).await
    }

    async fn restart(&self) -> Result<(), RpcError> {
        HttpSystemClient::restart(self).await
    }

    async fn shutdown(&self) -> Result<(), RpcError> {
        HttpSystemClient::shutdown(self).await
    }
}

#[derive(Debug, Clone)]
pub struct KvLogoutFlag {
    store: FileKvStore,
}

impl KvLogoutFlag {
    pub fn new(store: FileKvStore) -> Self {
        Self { store }
    }
}

impl LogoutFlagStore for KvLogoutFlag {
    fn load(&self) -> anyhow::Result<bool> {
        let value = self
            .store
            .get::<bool>(LOGOUT_FLAG_KEY)
            .with_context(|| format!("Failed to read {LOGOUT_FLAG_KEY}"))?;
        Ok(value.unwrap_or(false))
    }

    fn save(&self, value: bool) -> anyhow::Result<()> {
        self.store
            .set(LOGOUT_FLAG_KEY, &value)
            .with_context(|| format!("Failed to write {LOGOUT_FLAG_KEY}"))
    }
}

#[derive(Debug, Clone)]
pub struct KvSession {
    store: FileKvStore,
}

impl KvSession {
    pub fn new(store: FileKvStore) -> Self {
        Self { store }
    }

    pub fn token(&self) -> anyhow::Result<Option<String>> {
        self.store
            .get::<String>(AUTH_TOKEN_KEY)
            .context("Failed to read auth token")
    }

    pub fn set_token(&self, token: &str) -> anyhow::Result<()> {
        self.store
            .set(AUTH_TOKEN_KEY, &token.to_owned())
            .context("Failed to write auth token")
    }
}

impl SessionPort for KvSession {
    fn remove_token(&self) -> anyhow::Result<()> {
        self.store
            .remove(AUTH_TOKEN_KEY)
            .context("Failed to remove auth token")?;
        Ok(())
    }
}

/// Records navigations for a shell to act on (reload the view, exit, ...).
#[derive(Debug, Clone, Default)]
pub struct SignalNavigator {
    pending: Arc<Mutex<Vec<String>>>,
}

impl SignalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest navigation not yet handled by the shell.
    pub fn take_pending(&self) -> Option<String> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }
}

impl NavigatorPort for SignalNavigator {
    fn navigate(&self, path: &str) -> anyhow::Result<()> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_owned());
        Ok(())
    }
}
