use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::{FileService, ThumbnailService},
    domain::config::drive::DriveConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<DriveConfig>,
    pub file_service: FileService,
    pub thumbnail_service: Arc<dyn ThumbnailService>,
}
