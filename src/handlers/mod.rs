pub mod svis;
pub mod topology;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::backend::{FetchError, SubmissionError};
use crate::workflow::{FieldIssue, WorkflowError};
use crate::AppState;

/// Error response - {"error": "message"} plus per-field issues for
/// validation failures
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    issues: Vec<FieldIssue>,
}

impl ApiError {
    fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            issues: Vec::new(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, msg)
    }

    /// The network store failed or refused the request
    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                issues: self.issues,
            }),
        )
            .into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::bad_gateway(format!("Failed to fetch network data: {}", err))
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        if err.is_conflict() {
            return Self::conflict(format!("Failed to create SVI: {}", err));
        }
        Self::bad_gateway(format!("Failed to create SVI: {}", err))
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::Validation(v) => Self {
                issues: v.issues,
                ..Self::bad_request(message)
            },
            WorkflowError::Submission(s) => s.into(),
            WorkflowError::NotEditing => Self::new(StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

/// Response helper: return 201 Created with JSON body
pub fn created<T: Serialize>(item: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(item))
}

/// Healthcheck endpoint — reports the generation of the served snapshot
pub async fn healthcheck(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let snapshot = state.topology.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "service": "tenant-network",
        "network_store": state.config.network_api_url,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "generation": snapshot.generation(),
        "fetched_at": snapshot.fetched_at().map(|t| t.to_rfc3339()),
    }))
}
