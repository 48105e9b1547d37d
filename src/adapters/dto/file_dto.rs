use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, Column, FromRow, Row};

use crate::{
    application::dto::file_dto::FileDTO,
    domain::models::file::{format_file_size, FileSummary, StorageUsage},
};

impl FromRow<'_, PgRow> for FileDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let size: i64 = row.try_get("size")?;
        let has_content = row.columns().iter().any(|c| c.name() == "content");
        let content = if has_content {
            Some(row.try_get("content")?)
        } else {
            None
        };

        Ok(FileDTO {
            id: row.try_get("id")?,
            file_name: Some(row.try_get("file_name")?),
            file_type: Some(row.try_get("file_type")?),
            size: Some(size.max(0) as u64),
            content,
            trashed: Some(row.try_get("trashed")?),
            uploaded_at: Some(row.try_get("uploaded_at")?),
        })
    }
}

impl FileDTO {
    pub fn sanitize(&mut self) {
        if let Some(size) = self.size {
            self.size = Some(std::cmp::min(size, i64::MAX as u64));
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameForm {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FileEntry {
    pub id: i64,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
    pub size: u64,
    #[serde(rename = "formattedSize")]
    pub formatted_size: String,
    pub trashed: bool,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

impl From<FileSummary> for FileEntry {
    fn from(file: FileSummary) -> Self {
        Self {
            formatted_size: format_file_size(file.size),
            id: file.id,
            file_name: file.file_name,
            file_type: file.file_type,
            size: file.size,
            trashed: file.trashed,
            uploaded_at: file.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    /// Echo of the `fileId` query parameter, used by the client to keep a
    /// file selected across navigations.
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
    pub query: String,
    pub files: Vec<FileEntry>,
}

impl ListingResponse {
    pub fn new(file_id: Option<String>, query: String, files: Vec<FileSummary>) -> Self {
        Self {
            file_id: file_id.filter(|id| !id.trim().is_empty()),
            query,
            files: files.into_iter().map(FileEntry::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    #[serde(flatten)]
    pub usage: StorageUsage,
    #[serde(rename = "formattedTotal")]
    pub formatted_total: String,
}

impl From<StorageUsage> for UsageResponse {
    fn from(usage: StorageUsage) -> Self {
        Self {
            formatted_total: format_file_size(usage.total_bytes),
            usage,
        }
    }
}
