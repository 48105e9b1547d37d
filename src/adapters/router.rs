use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    state::AppState,
};

pub fn build_router(app_state: AppState, cors: CorsLayer) -> Router {
    let max_upload_size = app_state.config.max_upload_size;

    Router::new()
        .route("/", get(FileController::home))
        .route("/drive", get(FileController::home))
        .route("/drive/my-drive", get(FileController::home))
        .route("/trash", get(FileController::trash))
        .route("/trash/empty", post(FileController::empty_trash))
        .route("/upload", post(FileController::upload))
        .route("/drive/view/{file_id}", get(FileController::view))
        .route("/drive/thumbnail/{file_id}", get(FileController::thumbnail))
        .route("/drive/preview/{file_id}", get(FileController::preview))
        .route("/drive/download/{file_id}", get(FileController::download))
        .route(
            "/drive/move/{file_id}",
            get(FileController::move_to_trash).post(FileController::move_to_trash),
        )
        .route(
            "/drive/restore/{file_id}",
            get(FileController::restore).post(FileController::restore),
        )
        .route(
            "/drive/delete/{file_id}",
            get(FileController::delete).post(FileController::delete),
        )
        .route("/drive/rename/{file_id}", post(FileController::rename))
        .route("/api/v1/health", get(HealthController::health_check))
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Restricts CORS to `origins`, or allows every origin when none are given.
pub fn cors_layer(origins: Option<&[String]>) -> Result<CorsLayer, String> {
    let Some(origins) = origins else {
        return Ok(CorsLayer::permissive());
    };

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .map_err(|_| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
