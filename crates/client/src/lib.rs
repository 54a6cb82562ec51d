//! HTTP client for the SEAL simulation control API.
//!
//! - [`SealApi`] — result-returning wrappers over the stop and status routes.
//! - [`callbacks`] — fire-and-forget variants that hand the payload to a
//!   callback on success and drop failures after logging them.
//! - [`poller`] — repeating status poll owned through a [`PollHandle`].
//! - [`ClientConfig`] — base URL and timings loaded from the environment.

pub mod api;
pub mod callbacks;
pub mod config;
pub mod error;
pub mod poller;
pub mod source;

pub use api::SealApi;
pub use callbacks::{request_status, request_stop};
pub use config::ClientConfig;
pub use error::ClientError;
pub use poller::{poll_status, poll_status_results, PollHandle, PollResult};
pub use source::StatusSource;
