//! The seam the poller reads status through.

use async_trait::async_trait;
use seal_core::Payload;

use crate::api::SealApi;
use crate::error::ClientError;

/// Anything that can answer a status query.
///
/// [`SealApi`] is the production implementation; tests drive the poller
/// with in-memory sources.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<Payload, ClientError>;
}

#[async_trait]
impl StatusSource for SealApi {
    async fn fetch_status(&self) -> Result<Payload, ClientError> {
        self.status().await
    }
}
