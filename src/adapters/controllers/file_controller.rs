use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Redirect, Response},
    Form, Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::{ListingQuery, ListingResponse, RenameForm},
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::file::{file_extension, media_type_for_extension, UploadedFile},
};

const UPLOAD_FIELD: &str = "files[]";
const DRIVE_PATH: &str = "/drive";
const TRASH_PATH: &str = "/trash";

pub struct FileController;

impl FileController {
    /// GET /, /drive, /drive/my-drive
    pub async fn home(
        State(app_state): State<AppState>,
        Query(params): Query<ListingQuery>,
    ) -> Result<Json<ListingResponse>, ApplicationError> {
        let q = params.q.unwrap_or_default();
        let files = app_state.file_service.get_all_files(&q).await?;
        Ok(Json(ListingResponse::new(params.file_id, q, files)))
    }

    /// GET /trash
    pub async fn trash(
        State(app_state): State<AppState>,
        Query(params): Query<ListingQuery>,
    ) -> Result<Json<ListingResponse>, ApplicationError> {
        let files = app_state.file_service.get_trashed_files().await?;
        Ok(Json(ListingResponse::new(params.file_id, String::new(), files)))
    }

    /// POST /upload, one `files[]` part per file.
    pub async fn upload(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Redirect, ApplicationError> {
        let mut stored = 0usize;

        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let Some(file_name) = field.file_name().map(str::to_string) else {
                continue;
            };
            let content_type = field.content_type().map(str::to_string);
            let content = field.bytes().await?.to_vec();

            let upload = UploadedFile::new(file_name, content_type, content);
            if upload.is_empty_selection() {
                continue;
            }

            app_state.file_service.create_file(upload).await?;
            stored += 1;
        }

        if stored == 0 {
            warn!("Upload request contained no files");
        } else {
            info!("Uploaded {} file(s)", stored);
        }

        Ok(Redirect::to(DRIVE_PATH))
    }

    /// GET /drive/view/{file_id}. Unmapped extensions are sent without a
    /// Content-Type.
    pub async fn view(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Response, ApplicationError> {
        let file = app_state.file_service.find_file(file_id).await?;
        let media_type = media_type_for_extension(file_extension(&file.file_name));

        let mut builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_LENGTH, file.content.len());
        if let Some(media_type) = media_type {
            builder = builder.header(header::CONTENT_TYPE, media_type);
        }

        build(builder, file.content)
    }

    /// GET /drive/thumbnail/{file_id}
    pub async fn thumbnail(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Response, ApplicationError> {
        let file = app_state.file_service.find_file(file_id).await?;
        let png = app_state
            .thumbnail_service
            .generate_thumbnail(file.content)
            .await?;

        let builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .header(header::CONTENT_LENGTH, png.len());

        build(builder, png)
    }

    /// GET /drive/preview/{file_id}, always as an attachment.
    pub async fn preview(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Response, ApplicationError> {
        let file = app_state.file_service.find_file(file_id).await?;

        let builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header(header::CONTENT_LENGTH, file.content.len())
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", header_safe_name(&file.file_name)),
            );

        build(builder, file.content)
    }

    /// GET /drive/download/{file_id}, inline.
    pub async fn download(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Response, ApplicationError> {
        let file = app_state.file_service.find_file(file_id).await?;
        let media_type = media_type_for_extension(file_extension(&file.file_name))
            .unwrap_or("application/octet-stream");

        let builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, media_type)
            .header(header::CONTENT_LENGTH, file.content.len())
            .header(
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", header_safe_name(&file.file_name)),
            );

        build(builder, file.content)
    }

    /// GET|POST /drive/move/{file_id}
    pub async fn move_to_trash(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Redirect, ApplicationError> {
        app_state.file_service.move_to_trash(file_id).await?;
        Ok(Redirect::to(DRIVE_PATH))
    }

    /// GET|POST /drive/restore/{file_id}
    pub async fn restore(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Redirect, ApplicationError> {
        app_state.file_service.restore(file_id).await?;
        Ok(Redirect::to(DRIVE_PATH))
    }

    /// GET|POST /drive/delete/{file_id}
    pub async fn delete(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
    ) -> Result<Redirect, ApplicationError> {
        app_state.file_service.delete(file_id).await?;
        Ok(Redirect::to(DRIVE_PATH))
    }

    /// POST /drive/rename/{file_id}
    pub async fn rename(
        State(app_state): State<AppState>,
        Path(file_id): Path<i64>,
        Form(form): Form<RenameForm>,
    ) -> Result<Redirect, ApplicationError> {
        app_state.file_service.rename(file_id, &form.name).await?;
        Ok(Redirect::to(DRIVE_PATH))
    }

    /// POST /trash/empty
    pub async fn empty_trash(
        State(app_state): State<AppState>,
    ) -> Result<Redirect, ApplicationError> {
        app_state.file_service.empty_trash().await?;
        Ok(Redirect::to(TRASH_PATH))
    }
}

fn build(builder: axum::http::response::Builder, body: Vec<u8>) -> Result<Response, ApplicationError> {
    builder
        .body(Body::from(body))
        .map_err(|e| ApplicationError::InternalError(e.to_string()))
}

/// Keeps a file name usable inside a quoted header parameter.
fn header_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
