use serde::Serialize;

use crate::domain::config::server::ServerConfig;

/// Limits the handlers need at request time.
#[derive(Debug, Clone, Serialize)]
pub struct DriveConfig {
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: usize,
    #[serde(rename = "thumbnailSize")]
    pub thumbnail_size: u32,
}

impl From<&ServerConfig> for DriveConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_upload_size: config.max_upload_size,
            thumbnail_size: config.thumbnail_size,
        }
    }
}
