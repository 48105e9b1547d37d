use async_trait::async_trait;

use crate::application::error::ApplicationError;

#[async_trait]
pub trait ThumbnailService: Send + Sync {
    /// Renders `content` as a PNG preview.
    async fn generate_thumbnail(&self, content: Vec<u8>) -> Result<Vec<u8>, ApplicationError>;
}
