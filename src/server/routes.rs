// HTTP routes configuration

use super::handlers::{
    analyze_handler, health_handler, metrics_handler, not_found_handler, sample_handler,
};
use super::middleware::{request_id_layers, require_bearer};
use crate::analysis::MenuAnalyzer;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::provider::OpenRouterClient;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub type Analyzer = MenuAnalyzer<OpenRouterClient>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<Analyzer>,
}

pub fn create_router(config: AppConfig, analyzer: Analyzer) -> Result<Router> {
    let public_path = config.upload.public_path.trim_end_matches('/').to_string();
    if !public_path.starts_with('/') || public_path.len() < 2 {
        return Err(AppError::Config(format!(
            "upload.public_path must be a non-root absolute path, got {:?}",
            config.upload.public_path
        )));
    }

    let cors = cors_layer(config.auth.allowed_origin.as_deref())?;
    let body_limit = config.upload.max_bytes;
    let uploads = ServeDir::new(&config.upload.dir);

    let state = AppState {
        config: Arc::new(config),
        analyzer: Arc::new(analyzer),
    };

    let menu = Router::new()
        .route(
            "/analyze",
            post(analyze_handler).route_layer(from_fn_with_state(state.clone(), require_bearer)),
        )
        .route("/sample", get(sample_handler));

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/api/menu", menu)
        .nest_service(&public_path, uploads)
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}

fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let Some(origin) = allowed_origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| AppError::Config(format!("Invalid allowed_origin {:?}: {}", origin, e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}
