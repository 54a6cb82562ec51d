//! Opaque response bodies.
//!
//! The control API does not promise a body shape, so a [`Payload`] keeps the
//! raw bytes as received. Callers that know the schema decode on demand with
//! [`Payload::json`].

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::types::Timestamp;

/// The body of a successful control API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    status: u16,
    body: Vec<u8>,
    received_at: Timestamp,
}

impl Payload {
    /// Wrap a response body received now.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self::received(status, body, chrono::Utc::now())
    }

    /// Wrap a response body with an explicit receive time.
    pub fn received(status: u16, body: Vec<u8>, received_at: Timestamp) -> Self {
        Self {
            status,
            body,
            received_at,
        }
    }

    /// HTTP status code of the response (always 2xx for delivered payloads).
    pub fn status(&self) -> u16 {
        self.status
    }

    /// When the response body finished arriving.
    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
