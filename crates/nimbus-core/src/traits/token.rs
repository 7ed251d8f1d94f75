//! Credential source for the catalog backend.

use async_trait::async_trait;

use crate::result::AppResult;

/// Provides bearer credentials for authenticated catalog requests.
///
/// Implemented by the embedder's auth layer. `Ok(None)` means "no
/// credential currently available" — callers must treat that as a no-op,
/// not an error (the view simply receives no updates from that source).
#[async_trait]
pub trait TokenProvider: Send + Sync + 'static {
    /// Returns the current bearer token, if any.
    async fn bearer_token(&self) -> AppResult<Option<String>>;
}
