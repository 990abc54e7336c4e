pub mod actions;
pub mod adapters;
pub mod app;
pub mod app_core;
pub mod async_runtime;
pub mod domain;
pub mod error;
pub mod gate;
pub mod kernel;
pub mod persistence;
mod poller;
pub mod ports;
pub mod viewmodel;

pub use actions::PowerActions;
pub use app::{DefaultKernel, PowergateApplication};
pub use app_core::*;
pub use domain::{GateSettings, GateState, ProbeHealth, TransitionFlags};
pub use error::GateError;
pub use gate::{gate_view, GateView};
pub use kernel::{KernelOptions, PowerKernel};
pub use poller::PollRunId;
pub use ports::*;

pub use powergate_core::{PowerAction, RpcError, SystemStatus};
