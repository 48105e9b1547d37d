use chrono::{DateTime, Utc};

use crate::domain::models::file::{File, FileSummary};

/// Partial view of a file row. Inserts fill every field; updates only
/// carry a new name and/or trashed flag.
#[derive(Debug, Clone, Default)]
pub struct FileDTO {
    pub id: i64,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub size: Option<u64>,
    pub content: Option<Vec<u8>>,
    pub trashed: Option<bool>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl FileDTO {
    pub fn for_update(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn has_changes(&self) -> bool {
        self.file_name.is_some() || self.trashed.is_some()
    }
}

impl From<File> for FileDTO {
    fn from(value: File) -> Self {
        FileDTO {
            id: value.id,
            file_name: Some(value.file_name),
            file_type: Some(value.file_type),
            size: Some(value.size),
            content: Some(value.content),
            trashed: Some(value.trashed),
            uploaded_at: Some(value.uploaded_at),
        }
    }
}

impl From<FileDTO> for File {
    fn from(value: FileDTO) -> Self {
        File {
            id: value.id,
            file_name: value.file_name.unwrap_or_default(),
            file_type: value.file_type.unwrap_or_default(),
            size: value.size.unwrap_or(0),
            content: value.content.unwrap_or_default(),
            trashed: value.trashed.unwrap_or(false),
            uploaded_at: value.uploaded_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<FileDTO> for FileSummary {
    fn from(value: FileDTO) -> Self {
        File::from(value).into()
    }
}
