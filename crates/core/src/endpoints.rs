//! Well-known control API route constants.
//!
//! These must match the routes registered by the simulation host under its
//! `/api` prefix.

/// Kills the running simulation, if any.
pub const STOP_PATH: &str = "/api/stop";

/// Reports whether a simulation is running, with its log lines.
pub const STATUS_PATH: &str = "/api/status";

/// Join a base URL and a route path without doubling the separator.
pub fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
