// HTTP request handlers

use super::routes::AppState;
use super::upload::store_image;
use crate::analysis::{sample_analysis, AnalyzeResponse, MenuAnalysis};
use crate::error::{AppError, Result};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

const MISSING_IMAGE: &str = "Menu image is required";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

impl HealthCheck {
    fn new(status: &str, message: String) -> Self {
        Self {
            status: status.to_string(),
            message,
        }
    }
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let caller = state.analyzer.caller();
    let provider_check = if caller.has_credential() {
        HealthCheck::new("ok", format!("Models: {}", caller.models().join(", ")))
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck::new(
            "warning",
            "No provider credential, serving sample analyses".to_string(),
        )
    };
    checks.insert("provider".to_string(), provider_check);

    let upload_dir = Path::new(&state.config.upload.dir);
    let upload_check = if upload_dir.is_dir() {
        HealthCheck::new("ok", format!("Upload dir: {}", upload_dir.display()))
    } else {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck::new(
            "error",
            format!("Upload dir missing: {}", upload_dir.display()),
        )
    };
    checks.insert("uploads".to_string(), upload_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for `POST /api/menu/analyze`
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>> {
    let multipart = multipart.map_err(|e| {
        warn!("Analyze request is not a multipart upload: {}", e);
        AppError::InvalidRequest(MISSING_IMAGE.to_string())
    })?;

    let upload = store_image(&state.config.upload, multipart)
        .await?
        .ok_or_else(|| AppError::InvalidRequest(MISSING_IMAGE.to_string()))?;

    info!("Analyzing menu image: {}", upload.path.display());
    let analysis = state.analyzer.analyze(&upload.path).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        image: upload.public_path,
        analysis,
    }))
}

/// Handler for `GET /api/menu/sample`
pub async fn sample_handler() -> Json<MenuAnalysis> {
    Json(sample_analysis())
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}
