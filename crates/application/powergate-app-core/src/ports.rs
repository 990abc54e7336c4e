use powergate_core::{RpcError, SystemStatus};

#[async_trait::async_trait]
pub trait SystemRpc: Send + Sync + 'static {
    async fn status(&self) -> Result<SystemStatus, RpcError>;
    async fn restart(&self) -> Result<(), RpcError>;
    async fn shutdown(&self) -> Result<(), RpcError>;
}

/// Durable home of the `should-logout-on-running` flag.
pub trait LogoutFlagStore: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<bool>;
    fn save(&self, value: bool) -> anyhow::Result<()>;
}

pub trait SessionPort: Send + Sync + 'static {
    fn remove_token(&self) -> anyhow::Result<()>;
}

pub trait NavigatorPort: Send + Sync + 'static {
    fn navigate(&self, path: &str) -> anyhow::Result<()>;
}
