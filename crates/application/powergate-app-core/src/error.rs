#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The status probe failed while no restart/shutdown was in flight.
    #[error("backend status unavailable: {0}")]
    StatusUnavailable(String),
}
