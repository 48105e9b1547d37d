use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Failed to encode thumbnail: {0}")]
    EncodeError(#[from] image::ImageError),

    #[error("Thumbnail task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl From<ThumbnailError> for ApplicationError {
    fn from(error: ThumbnailError) -> Self {
        ApplicationError::InternalError(format!("Thumbnail error: {}", error))
    }
}
