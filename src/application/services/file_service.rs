use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    application::{
        dto::file_dto::FileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::file::{extract_file_type, File, FileSummary, StorageUsage, UploadedFile},
};

const MAX_FILE_NAME_LEN: usize = 255;

#[derive(Clone)]
pub struct FileService {
    repository: Arc<dyn FileRepository>,
}

impl FileService {
    pub fn new(repository: Arc<dyn FileRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_files(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError> {
        self.repository.list_files(query.trim()).await
    }

    pub async fn get_trashed_files(&self) -> Result<Vec<FileSummary>, ApplicationError> {
        self.repository.list_trashed_files().await
    }

    pub async fn create_file(&self, upload: UploadedFile) -> Result<FileSummary, ApplicationError> {
        let file_name = validate_file_name(&upload.file_name)
            .inspect_err(|_| warn!("Rejected upload with invalid name"))?;
        let file_type = extract_file_type(upload.content_type.as_deref());
        let size = upload.size();

        let dto = FileDTO {
            id: 0,
            file_name: Some(file_name),
            file_type: Some(file_type),
            size: Some(size),
            content: Some(upload.content),
            trashed: Some(false),
            uploaded_at: Some(Utc::now()),
        };

        let created = self.repository.create_file(dto).await?;
        info!(
            "Stored file {} ({}, {} bytes) as id {}",
            created.file_name, created.file_type, created.size, created.id
        );
        Ok(created)
    }

    pub async fn find_file(&self, id: i64) -> Result<File, ApplicationError> {
        self.repository.get_file(id).await
    }

    /// Trashes an active file, or restores a trashed one.
    pub async fn move_to_trash(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let file = self.repository.toggle_trashed(id).await?;
        if file.trashed {
            info!("Moved file {} to trash", id);
        } else {
            info!("Restored file {} from trash", id);
        }
        Ok(file)
    }

    pub async fn restore(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let mut dto = FileDTO::for_update(id);
        dto.trashed = Some(false);
        let file = self.repository.update_file(dto).await?;
        info!("Restored file {} from trash", id);
        Ok(file)
    }

    pub async fn delete(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let file = self.repository.delete_file(id).await?;
        info!("Permanently deleted file {} ({})", id, file.file_name);
        Ok(file)
    }

    pub async fn rename(&self, id: i64, name: &str) -> Result<FileSummary, ApplicationError> {
        let name = validate_file_name(name)
            .inspect_err(|_| warn!("Rejected new name for file {}", id))?;

        let mut dto = FileDTO::for_update(id);
        dto.file_name = Some(name);
        let file = self.repository.update_file(dto).await?;
        info!("Renamed file {} to {}", id, file.file_name);
        Ok(file)
    }

    pub async fn empty_trash(&self) -> Result<u64, ApplicationError> {
        let purged = self.repository.purge_trashed().await?;
        info!("Emptied trash, {} files removed", purged);
        Ok(purged)
    }

    pub async fn usage(&self) -> Result<StorageUsage, ApplicationError> {
        self.repository.usage().await
    }
}

/// Trimmed name, 1 to `MAX_FILE_NAME_LEN` characters. Shared by upload and
/// rename so every stored name can also be set by a rename.
fn validate_file_name(name: &str) -> Result<String, ApplicationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApplicationError::BadRequest(
            "File name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_FILE_NAME_LEN {
        return Err(ApplicationError::BadRequest(format!(
            "File name must be at most {} characters",
            MAX_FILE_NAME_LEN
        )));
    }
    Ok(name.to_string())
}
