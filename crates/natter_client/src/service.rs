use async_trait::async_trait;

use crate::error::Result;

/// One round-trip with the external reply service. Object-safe so the
/// controller can hold `Arc<dyn ReplyService>` and tests can substitute a
/// canned implementation.
#[async_trait]
pub trait ReplyService: Send + Sync {
    /// Submit the user's text and return the service's reply verbatim.
    async fn reply(&self, message: &str) -> Result<String>;
}
