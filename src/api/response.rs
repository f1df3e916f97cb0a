//! Response types for the Compensation Recommendation Engine API.
//!
//! This module defines the batch response body, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BackendError, EngineError};
use crate::models::{BatchReport, BatchSummary, RecommendationRow, SkippedEmployee};

/// Response body for the `/recommend/batch` endpoint: the run's metadata and
/// its three output sheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Unique identifier for the run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// The version of the engine that produced the run.
    pub engine_version: String,
    /// Summary counts.
    pub summary: BatchSummary,
    /// Every result row, in input order.
    pub results: Vec<RecommendationRow>,
    /// RAISE rows.
    pub raises: Vec<RecommendationRow>,
    /// NO_RAISE rows, fallbacks included.
    pub no_raises: Vec<RecommendationRow>,
    /// Employees excluded from the results.
    pub skipped: Vec<SkippedEmployee>,
    /// True if the run was cut short.
    pub cancelled: bool,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

impl From<BatchReport> for BatchResponse {
    fn from(report: BatchReport) -> Self {
        let summary = report.summary();
        let sheets = report.sheets();

        Self {
            run_id: report.run_id,
            started_at: report.started_at,
            engine_version: report.engine_version,
            summary,
            results: sheets.all,
            raises: sheets.raises,
            no_raises: sheets.no_raises,
            skipped: report.skipped,
            cancelled: report.cancelled,
            duration_ms: report.duration_ms,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. }
            | EngineError::MissingCredential { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::InvalidEmployee {
                employee_id,
                field,
                message,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    format!("Invalid employee '{}' field '{}': {}", employee_id, field, message),
                    "The employee data is incomplete or out of range",
                ),
            },
            EngineError::InvalidBand { field, message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_BAND",
                    format!("Invalid band policy field '{}': {}", field, message),
                    "The matched salary band is missing data required for a recommendation",
                ),
            },
            EngineError::NoBandMatch { employee_id } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "NO_BAND_MATCH",
                    format!("No salary band matches employee '{}'", employee_id),
                    "Check the department, position, level, region and tenure against the band table",
                ),
            },
            EngineError::Backend(BackendError::RateLimited { retries }) => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "BACKEND_UNAVAILABLE",
                    "Recommendation backend is rate limiting requests",
                    format!("Gave up after {} retries", retries),
                ),
            },
            EngineError::Backend(backend_error) => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "BACKEND_ERROR",
                    "Recommendation backend request failed",
                    backend_error.to_string(),
                ),
            },
            EngineError::Cancelled => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("CANCELLED", "The request was cancelled"),
            },
        }
    }
}
