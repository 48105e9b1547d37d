use std::sync::Arc;

use drive_service::{
    adapters::repositories::PgFileRepository,
    application::{repositories::file_repository::FileRepository, services::FileService},
    build_router, cors_layer,
    domain::config::{drive::DriveConfig, server::ServerConfig},
    services, AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drive_service=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("ERROR: invalid server configuration");

    tracing::info!("Starting drive-service on port {}", config.port);

    let cors = cors_layer(config.cors_allowed_origins.as_deref())
        .expect("ERROR: invalid CORS_ALLOWED_ORIGINS");

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");
    tracing::info!("Database connection established");

    let drive_config = DriveConfig::from(&config);
    let file_repository = Arc::new(PgFileRepository::new(pool)) as Arc<dyn FileRepository>;

    let app_state = AppState {
        thumbnail_service: services::create_thumbnail_service(&drive_config),
        file_service: FileService::new(file_repository),
        config: Arc::new(drive_config),
    };

    let router = build_router(app_state, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
