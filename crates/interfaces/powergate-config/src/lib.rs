//! Central configuration constants for polling, timers and storage keys.

/// Default status poll period while no transition is in progress.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Status poll period once this client has requested a restart or shutdown.
pub const TRIGGERED_POLL_INTERVAL_MS: u64 = 500;

/// Minimum allowed default poll period.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Maximum allowed default poll period.
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Grace period after the status probe starts failing during shutdown.
pub const SHUTDOWN_COMPLETE_AFTER_MS: u64 = 30_000;

/// Delay between clearing the logout flag and performing the logout.
pub const REAUTH_DELAY_MS: u64 = 1_000;

/// Per-request timeout for the HTTP client.
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Key-value store key for the durable "logout owed" flag.
pub const LOGOUT_FLAG_KEY: &str = "should-logout-on-running";

/// Key-value store key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth-token";

/// Where the client navigates after a forced logout.
pub const ROOT_PATH: &str = "/";

/// Backend used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

/// Convenience function to clamp a poll period into the allowed range.
pub fn clamp_poll_interval_ms(v: u64) -> u64 {
    v.clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS)
}
