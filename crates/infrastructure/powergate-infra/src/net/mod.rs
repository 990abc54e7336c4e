use powergate_config::{AUTH_TOKEN_KEY, REQUEST_TIMEOUT_MS};
use powergate_core::rpc::{
    procedure_path, RpcErrorBody, RESTART_PROCEDURE, SHUTDOWN_PROCEDURE, STATUS_PROCEDURE,
};
use powergate_core::{RpcEnvelope, RpcError, SystemStatus};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::kv::FileKvStore;

/// Shared client configuration for talking to the backend.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
        .user_agent(concat!("powergate/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Normalize a backend URL so procedure paths can be joined onto it.
pub(crate) fn normalize_base(base_url: &str) -> Result<Url, RpcError> {
    let mut url = Url::parse(base_url).map_err(|e| RpcError::InvalidUrl {
        url: base_url.to_owned(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(RpcError::InvalidUrl {
            url: base_url.to_owned(),
            message: "url cannot be used as a base".into(),
        });
    }

    // `Url::join` replaces the last segment unless the path ends with `/`.
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }

    Ok(url)
}

/// HTTP transport for the `system.*` procedures.
#[derive(Debug, Clone)]
pub struct HttpSystemClient {
    client: Client,
    base: Url,
    tokens: Option<FileKvStore>,
}

impl HttpSystemClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self, RpcError> {
        Ok(Self {
            client,
            base: normalize_base(base_url)?,
            tokens: None,
        })
    }

    /// Send the stored bearer token (if any) with every request.
    pub fn with_token_store(mut self, store: FileKvStore) -> Self {
        self.tokens = Some(store);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn status(&self) -> Result<SystemStatus, RpcError> {
        let url = self.procedure_url(STATUS_PROCEDURE)?;
        debug!(%url, "querying status");
        let resp = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| transport(STATUS_PROCEDURE, e))?;
        let resp = ensure_success(STATUS_PROCEDURE, resp).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| transport(STATUS_PROCEDURE, e))?;

        let envelope: RpcEnvelope<SystemStatus> =
            serde_json::from_slice(&bytes).map_err(|e| RpcError::Decode {
                procedure: STATUS_PROCEDURE.into(),
                message: e.to_string(),
            })?;
        Ok(envelope.into_data())
    }

    pub async fn restart(&self) -> Result<(), RpcError> {
        self.mutate(RESTART_PROCEDURE).await
    }

    pub async fn shutdown(&self) -> Result<(), RpcError> {
        self.mutate(SHUTDOWN_PROCEDURE).await
    }

    async fn mutate(&self, procedure: &str) -> Result<(), RpcError> {
        let url = self.procedure_url(procedure)?;
        debug!(%url, "calling mutation");
        let resp = self
            .authorized(self.client.post(url))
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await
            .map_err(|e| transport(procedure, e))?;
        ensure_success(procedure, resp).await?;
        Ok(())
    }

    fn procedure_url(&self, procedure: &str) -> Result<Url, RpcError> {
        self.base
            .join(&procedure_path(procedure))
            .map_err(|e| RpcError::InvalidUrl {
                url: format!("{}{}", self.base, procedure_path(procedure)),
                message: e.to_string(),
            })
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        let Some(store) = &self.tokens else {
            return req;
        };
        match store.get::<String>(AUTH_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                req.header(AUTHORIZATION, format!("Bearer {token}"))
            }
            Ok(_) => req,
            Err(e) => {
                warn!("Failed to read auth token from {}: {}", store.path(), e);
                req
            }
        }
    }
}

fn transport(procedure: &str, e: reqwest::Error) -> RpcError {
    RpcError::Transport {
        procedure: procedure.into(),
        message: e.to_string(),
    }
}

async fn ensure_success(procedure: &str, resp: Response) -> Result<Response, RpcError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<RpcErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                body
            }
        });

    Err(RpcError::Rejected {
        procedure: procedure.into(),
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_without_trailing_slash_keeps_its_path() {
        let base = normalize_base("http://host:3000/api").unwrap();
        let url = base.join(&procedure_path(STATUS_PROCEDURE)).unwrap();
        assert_eq!(url.as_str(), "http://host:3000/api/trpc/system.status");
    }

    #[test]
    fn bare_host_gets_root_path() {
        let base = normalize_base("http://host:3000").unwrap();
        let url = base.join(&procedure_path(RESTART_PROCEDURE)).unwrap();
        assert_eq!(url.as_str(), "http://host:3000/trpc/system.restart");
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            normalize_base("not a url"),
            Err(RpcError::InvalidUrl { .. })
        ));
    }
}
