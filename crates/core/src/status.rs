//! Typed views of the control API bodies.
//!
//! The simulation host answers `/api/status` with
//! `{"success": true, "running": <bool>, "logs": [<line>, ...]}` and
//! `/api/stop` with `{"success": true}`. `logs` is empty while nothing is
//! running. These types are a convenience; the client never requires them.

use serde::{Deserialize, Serialize};

/// Body of the status route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub success: bool,
    /// Whether a simulation process is alive on the host.
    pub running: bool,
    /// Output of the running simulation, one entry per line.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl StatusReport {
    /// Most recent log line, if any.
    pub fn last_log(&self) -> Option<&str> {
        self.logs.last().map(String::as_str)
    }
}

/// Body of the stop route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopAck {
    #[serde(default)]
    pub success: bool,
}
