pub mod file_service;
pub mod thumbnail_service;

pub use file_service::FileService;
pub use thumbnail_service::ThumbnailService;
