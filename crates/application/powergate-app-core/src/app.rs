use anyhow::Context;
use tokio::runtime::Handle;

use powergate_infra::{default_http_client, HttpSystemClient};

use crate::adapters::{KvLogoutFlag, KvSession, SignalNavigator};
use crate::domain::GateSettings;
use crate::kernel::{KernelOptions, PowerKernel};
use crate::persistence::FilePersistence;

pub type DefaultKernel = PowerKernel<HttpSystemClient, KvLogoutFlag, KvSession, SignalNavigator>;

/// Kernel wired to the HTTP backend and the file-backed client state.
pub struct PowergateApplication {
    pub kernel: DefaultKernel,
    pub navigator: SignalNavigator,
    pub session: KvSession,
    pub settings: GateSettings,
}

impl PowergateApplication {
    pub fn new(
        runtime: Handle,
        persistence: &FilePersistence,
        settings: GateSettings,
    ) -> anyhow::Result<Self> {
        let state = persistence.state_store()?;
        let client = default_http_client().context("Failed to build HTTP client")?;
        let rpc = HttpSystemClient::new(client, &settings.backend_url)
            .context("Invalid backend URL")?
            .with_token_store(state.clone());

        let navigator = SignalNavigator::new();
        let session = KvSession::new(state.clone());
        let kernel = PowerKernel::new(
            runtime,
            rpc,
            KvLogoutFlag::new(state),
            session.clone(),
            navigator.clone(),
            KernelOptions::from(&settings),
        );

        Ok(Self {
            kernel,
            navigator,
            session,
            settings,
        })
    }
}
