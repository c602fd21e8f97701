use crate::config::ServerConfig;
use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        DefaultBodyLimit, Json, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use pdfscope::{AnalysisError, AnalysisService, IntakePolicy, UploadedArtifact};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "file";

/// Room for multipart framing on top of the largest accepted document
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
    /// Optional diagnostic text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Shared, read-only state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
    pub intake: IntakePolicy,
}

impl AppState {
    pub fn new(service: AnalysisService, intake: IntakePolicy) -> Self {
        Self {
            service: Arc::new(service),
            intake,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            AnalysisService::from_config(&config.scan_config()),
            config.intake_policy(),
        )
    }
}

/// Application-specific error types for the API
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation and scan failures from the analysis pipeline
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    /// The request body was not readable multipart form data
    #[error("Invalid upload: {0}")]
    Upload(String),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Upload(err.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        AppError::Upload(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Analysis(AnalysisError::Validation(message)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),
            AppError::Upload(details) => {
                warn!("Rejected upload: {details}");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid upload".to_string(),
                        details: Some(details),
                    },
                )
            }
            AppError::Analysis(err) => {
                error!("Error analyzing PDF: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Failed to analyze PDF".to_string(),
                        details: err.details(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router with all routes configured
pub fn app(state: AppState) -> Router {
    let body_limit = usize::try_from(state.intake.max_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/api/analyze-pdf", post(analyze_pdf))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pdfscope API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Analyze an uploaded PDF for structural risk indicators
pub async fn analyze_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = multipart?;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some(UploadedArtifact::new(filename, bytes.to_vec()));
            break;
        }
    }

    if let Some(artifact) = &upload {
        state
            .intake
            .check(artifact.filename(), artifact.size() as u64)?;
    }

    let report = state.service.analyze(upload).await?;

    Ok((StatusCode::OK, Json(report)).into_response())
}
