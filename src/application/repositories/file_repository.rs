use async_trait::async_trait;

use crate::{
    application::{dto::file_dto::FileDTO, error::ApplicationError},
    domain::models::file::{File, FileSummary, StorageUsage},
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_file(&self, file: FileDTO) -> Result<FileSummary, ApplicationError>;
    async fn get_file(&self, id: i64) -> Result<File, ApplicationError>;
    /// Non-trashed files whose name contains `query`, ignoring case.
    async fn list_files(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError>;
    async fn list_trashed_files(&self) -> Result<Vec<FileSummary>, ApplicationError>;
    /// Applies a new name and/or trashed flag; other fields are ignored.
    async fn update_file(&self, file: FileDTO) -> Result<FileSummary, ApplicationError>;
    async fn toggle_trashed(&self, id: i64) -> Result<FileSummary, ApplicationError>;
    async fn delete_file(&self, id: i64) -> Result<FileSummary, ApplicationError>;
    async fn purge_trashed(&self) -> Result<u64, ApplicationError>;
    async fn usage(&self) -> Result<StorageUsage, ApplicationError>;
}
