pub mod effects;
pub mod events;
pub mod reducer;
pub mod store;

pub use effects::{GateEffect, QueryScope};
pub use events::{GateEvent, ProbeResult, SessionEpoch};
pub use reducer::{reduce, Transition};
pub use store::GateStore;
