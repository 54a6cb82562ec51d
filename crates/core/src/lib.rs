//! Shared types for the SEAL simulation control client.
//!
//! - [`endpoints`] — paths of the control API routes.
//! - [`payload`] — the opaque response body handed to callers.
//! - [`status`] — optional typed views of the bodies the simulation host
//!   returns from its stop and status routes.

pub mod endpoints;
pub mod payload;
pub mod status;
pub mod types;

pub use payload::Payload;
pub use status::{StatusReport, StopAck};
