//! Fire-and-forget control requests.
//!
//! Each call spawns the request and returns at once. The callback runs
//! exactly once with the response body when the host answers with a 2xx
//! status. On any failure (network, non-2xx, timeout) the callback is never
//! invoked and nothing is reported to the caller; the failure is only
//! logged. Use [`SealApi`] directly to observe failures.

use seal_core::endpoints::{STATUS_PATH, STOP_PATH};
use seal_core::Payload;
use tokio::task::JoinHandle;

use crate::api::SealApi;
use crate::error::ClientError;

/// Stop the running simulation, then hand the response body to
/// `on_complete`.
///
/// The returned handle only reports when the request finished; awaiting it
/// is optional. Must be called from within a Tokio runtime.
pub fn request_stop<F>(api: &SealApi, on_complete: F) -> JoinHandle<()>
where
    F: FnOnce(Payload) + Send + 'static,
{
    let api = api.clone();
    tokio::spawn(async move {
        deliver(STOP_PATH, api.stop().await, on_complete);
    })
}

/// Query status, then hand the response body to `on_complete`.
///
/// Same contract as [`request_stop`].
pub fn request_status<F>(api: &SealApi, on_complete: F) -> JoinHandle<()>
where
    F: FnOnce(Payload) + Send + 'static,
{
    let api = api.clone();
    tokio::spawn(async move {
        deliver(STATUS_PATH, api.status().await, on_complete);
    })
}

fn deliver<F>(endpoint: &str, result: Result<Payload, ClientError>, on_complete: F)
where
    F: FnOnce(Payload),
{
    match result {
        Ok(payload) => on_complete(payload),
        Err(e) => {
            tracing::warn!(endpoint, error = %e, "Control request failed, dropping response");
        }
    }
}
