pub mod action;
pub mod rpc;
pub mod status;

pub use action::PowerAction;
pub use rpc::{RpcEnvelope, RpcError, RpcErrorBody};
pub use status::SystemStatus;
