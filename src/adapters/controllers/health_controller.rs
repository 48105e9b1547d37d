use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::{
    adapters::dto::file_dto::UsageResponse,
    application::{error::ApplicationError, services::FileService},
    domain::config::drive::DriveConfig,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: UsageResponse,
    pub config: DriveConfig,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

impl SystemMetrics {
    fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Self {
            cpu_usage_percent: sys.global_cpu_usage(),
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        }
    }
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health. Fails when the database is unreachable.
    pub async fn health_check(
        State(file_service): State<FileService>,
        State(config): State<Arc<DriveConfig>>,
    ) -> Result<Json<HealthResponse>, ApplicationError> {
        info!("Health check requested");

        let usage = file_service.usage().await?;

        Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: UsageResponse::from(usage),
            config: config.as_ref().clone(),
            metrics: SystemMetrics::collect(),
        }))
    }
}
