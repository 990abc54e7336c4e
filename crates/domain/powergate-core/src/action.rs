use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rpc::{RESTART_PROCEDURE, SHUTDOWN_PROCEDURE};

/// Remote power operations a client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerAction {
    Restart,
    Shutdown,
}

impl PowerAction {
    /// Procedure name of the mutation backing this action.
    pub fn procedure(self) -> &'static str {
        match self {
            PowerAction::Restart => RESTART_PROCEDURE,
            PowerAction::Shutdown => SHUTDOWN_PROCEDURE,
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerAction::Restart => f.write_str("restart"),
            PowerAction::Shutdown => f.write_str("shutdown"),
        }
    }
}
