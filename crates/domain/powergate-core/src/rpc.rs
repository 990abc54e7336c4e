//! Wire shapes of the `system.*` procedures.

use serde::{Deserialize, Serialize};

pub const STATUS_PROCEDURE: &str = "system.status";
pub const RESTART_PROCEDURE: &str = "system.restart";
pub const SHUTDOWN_PROCEDURE: &str = "system.shutdown";

/// Path prefix under the backend base URL where procedures are mounted.
pub const PROCEDURE_PREFIX: &str = "trpc";

/// Successful response: `{"result":{"data": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcEnvelope<T> {
    pub result: RpcResult<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResult<T> {
    pub data: T,
}

impl<T> RpcEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            result: RpcResult { data },
        }
    }

    pub fn into_data(self) -> T {
        self.result.data
    }
}

/// Error response: `{"error":{"message": "...", "code": -32603}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub error: RpcErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

/// Relative path of a procedure, e.g. `trpc/system.status`.
pub fn procedure_path(procedure: &str) -> String {
    format!("{PROCEDURE_PREFIX}/{procedure}")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("invalid backend url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("{procedure} transport error: {message}")]
    Transport { procedure: String, message: String },
    #[error("{procedure} rejected with HTTP {status}: {message}")]
    Rejected {
        procedure: String,
        status: u16,
        message: String,
    },
    #[error("{procedure} response could not be decoded: {message}")]
    Decode { procedure: String, message: String },
}

impl RpcError {
    /// The backend answered and refused the call. Transport failures are
    /// ambiguous: the backend may already be going down.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RpcError::Rejected { .. })
    }
}
