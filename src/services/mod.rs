mod error;
mod image_thumbnail;

pub use error::ThumbnailError;
pub use image_thumbnail::ImageThumbnailService;

use std::sync::Arc;

use crate::{application::services::ThumbnailService, domain::config::drive::DriveConfig};

pub fn create_thumbnail_service(config: &DriveConfig) -> Arc<dyn ThumbnailService> {
    Arc::new(ImageThumbnailService::new(config.thumbnail_size))
}
