use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    pub id: i64,
    pub file_name: String,
    pub file_type: String,
    pub size: u64,
    #[serde(skip)]
    pub content: Vec<u8>,
    pub trashed: bool,
    pub uploaded_at: DateTime<Utc>,
}

/// A file row without its content, used wherever the blob is not needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub id: i64,
    pub file_name: String,
    pub file_type: String,
    pub size: u64,
    pub trashed: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl From<File> for FileSummary {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            file_name: file.file_name,
            file_type: file.file_type,
            size: file.size,
            trashed: file.trashed,
            uploaded_at: file.uploaded_at,
        }
    }
}

/// One part of an upload request, as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: String, content_type: Option<String>, content: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            content,
        }
    }

    /// An empty file input still submits a part with no name and no bytes.
    pub fn is_empty_selection(&self) -> bool {
        self.file_name.is_empty() && self.content.is_empty()
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StorageUsage {
    #[serde(rename = "fileCount")]
    pub file_count: u64,
    #[serde(rename = "trashedCount")]
    pub trashed_count: u64,
    #[serde(rename = "totalBytes")]
    pub total_bytes: u64,
}

/// Subtype of a `type/subtype` content type, or an empty string for anything else.
pub fn extract_file_type(content_type: Option<&str>) -> String {
    let Some(content_type) = content_type else {
        return String::new();
    };
    let mut parts: Vec<&str> = content_type.split('/').collect();
    while parts.last() == Some(&"") {
        parts.pop();
    }
    if parts.len() == 2 {
        parts[1].to_string()
    } else {
        String::new()
    }
}

pub fn file_extension(file_name: &str) -> &str {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    match base.rfind('.') {
        Some(idx) => &base[idx + 1..],
        None => "",
    }
}

pub fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    if extension.eq_ignore_ascii_case("png") {
        Some("image/png")
    } else if extension.eq_ignore_ascii_case("pdf") {
        Some("application/pdf")
    } else if extension.eq_ignore_ascii_case("mp4") {
        Some("video/mp4")
    } else {
        None
    }
}

pub fn format_file_size(size: u64) -> String {
    if size < KIB {
        format!("{} bytes", size)
    } else if size < MIB {
        format!("{} KB", size / KIB)
    } else {
        format!("{} MB", size / MIB)
    }
}
