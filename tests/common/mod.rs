//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::{
    multipart::{MultipartForm, Part},
    TestServer,
};
use drive_service::{
    application::{
        dto::file_dto::FileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
        services::{FileService, ThumbnailService},
    },
    build_router, cors_layer,
    domain::{
        config::drive::DriveConfig,
        models::file::{File, FileSummary, StorageUsage},
    },
    services::ImageThumbnailService,
    AppState,
};

/// `FileRepository` backed by a vector, mirroring the Postgres semantics.
#[derive(Default)]
pub struct InMemoryFileRepository {
    inner: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    files: Vec<File>,
}

impl InMemoryFileRepository {
    fn sorted(mut files: Vec<FileSummary>) -> Vec<FileSummary> {
        files.sort_by(|a, b| (b.uploaded_at, b.id).cmp(&(a.uploaded_at, a.id)));
        files
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<FileSummary, ApplicationError> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let mut file: File = file.into();
        file.id = store.next_id;
        store.files.push(file.clone());
        Ok(file.into())
    }

    async fn get_file(&self, id: i64) -> Result<File, ApplicationError> {
        let store = self.inner.lock().unwrap();
        store
            .files
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn list_files(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError> {
        let store = self.inner.lock().unwrap();
        let needle = query.to_lowercase();
        let files = store
            .files
            .iter()
            .filter(|f| !f.trashed && f.file_name.to_lowercase().contains(&needle))
            .cloned()
            .map(FileSummary::from)
            .collect();
        Ok(Self::sorted(files))
    }

    async fn list_trashed_files(&self) -> Result<Vec<FileSummary>, ApplicationError> {
        let store = self.inner.lock().unwrap();
        let files = store
            .files
            .iter()
            .filter(|f| f.trashed)
            .cloned()
            .map(FileSummary::from)
            .collect();
        Ok(Self::sorted(files))
    }

    async fn update_file(&self, update: FileDTO) -> Result<FileSummary, ApplicationError> {
        let mut store = self.inner.lock().unwrap();
        let file = store
            .files
            .iter_mut()
            .find(|f| f.id == update.id)
            .ok_or(ApplicationError::NotFound)?;
        if let Some(file_name) = update.file_name {
            file.file_name = file_name;
        }
        if let Some(trashed) = update.trashed {
            file.trashed = trashed;
        }
        Ok(file.clone().into())
    }

    async fn toggle_trashed(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let mut store = self.inner.lock().unwrap();
        let file = store
            .files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(ApplicationError::NotFound)?;
        file.trashed = !file.trashed;
        Ok(file.clone().into())
    }

    async fn delete_file(&self, id: i64) -> Result<FileSummary, ApplicationError> {
        let mut store = self.inner.lock().unwrap();
        let idx = store
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or(ApplicationError::NotFound)?;
        Ok(store.files.remove(idx).into())
    }

    async fn purge_trashed(&self) -> Result<u64, ApplicationError> {
        let mut store = self.inner.lock().unwrap();
        let before = store.files.len();
        store.files.retain(|f| !f.trashed);
        Ok((before - store.files.len()) as u64)
    }

    async fn usage(&self) -> Result<StorageUsage, ApplicationError> {
        let store = self.inner.lock().unwrap();
        Ok(StorageUsage {
            file_count: store.files.iter().filter(|f| !f.trashed).count() as u64,
            trashed_count: store.files.iter().filter(|f| f.trashed).count() as u64,
            total_bytes: store.files.iter().map(|f| f.size).sum(),
        })
    }
}

pub fn test_config() -> DriveConfig {
    DriveConfig {
        max_upload_size: 1024 * 1024,
        thumbnail_size: 64,
    }
}

pub fn file_service() -> FileService {
    FileService::new(Arc::new(InMemoryFileRepository::default()))
}

/// Create a test server over an empty in-memory store.
pub fn create_test_server_with(config: DriveConfig) -> TestServer {
    let thumbnail_service: Arc<dyn ThumbnailService> =
        Arc::new(ImageThumbnailService::new(config.thumbnail_size));

    let app_state = AppState {
        config: Arc::new(config),
        file_service: file_service(),
        thumbnail_service,
    };

    let cors = cors_layer(None).expect("permissive CORS layer");
    TestServer::new(build_router(app_state, cors)).expect("Failed to create test server")
}

pub fn create_test_server() -> TestServer {
    create_test_server_with(test_config())
}

/// Upload a single file and return the id it was stored under.
pub async fn upload(server: &TestServer, file_name: &str, mime_type: &str, content: &[u8]) -> i64 {
    let form = MultipartForm::new().add_part(
        "files[]",
        Part::bytes(content.to_vec())
            .file_name(file_name)
            .mime_type(mime_type),
    );
    let response = server.post("/upload").multipart(form).await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);

    let listing: serde_json::Value = server.get("/drive").await.json();
    listing["files"]
        .as_array()
        .and_then(|files| files.iter().find(|f| f["fileName"] == file_name))
        .and_then(|f| f["id"].as_i64())
        .expect("uploaded file is listed")
}

pub fn listed_names(listing: &serde_json::Value) -> Vec<String> {
    listing["files"]
        .as_array()
        .map(|files| {
            files
                .iter()
                .filter_map(|f| f["fileName"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
