use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    /// The in-flight `system.status` request.
    Status,
    /// Every pending query of this session.
    All,
}

/// Side effects requested by [`reduce`](super::reduce), executed by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEffect {
    PersistLogoutFlag(bool),
    StartShutdownTimer(Duration),
    ScheduleReauth(Duration),
    CancelQueries(QueryScope),
    ClearAuthToken,
    Navigate(String),
    /// Status probe failed with no transition under way.
    RaiseStatusError(String),
}
