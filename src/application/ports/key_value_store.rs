use async_trait::async_trait;

use crate::app_error::AppResult;

/// Get/set-by-key string storage.
///
/// Implementations only promise single-key atomicity. Callers that do
/// read-modify-write across keys must serialize themselves.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrites whatever the key held before.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
}
