//! HTTP request handlers for the Compensation Recommendation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Employee;

use super::request::{BatchRequest, RecommendRequest};
use super::response::{ApiError, ApiErrorResponse, BatchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/recommend", post(recommend_handler))
        .route("/recommend/batch", post(batch_handler))
        .route("/bands", get(bands_handler))
        .with_state(state)
}

/// Handler for POST /recommend endpoint.
///
/// Runs the pipeline for one employee. Every failure, including an
/// unmatched band, is reported as an error response.
async fn recommend_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recommendation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let employee: Employee = request.employee.into();
    let employee_id = employee.id.clone();

    let start_time = Instant::now();
    match state.runner().recommend_one(employee).await {
        Ok(row) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                decision = %row.decision(),
                provenance = ?row.provenance,
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Recommendation completed"
            );
            json_response(StatusCode::OK, &row)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Recommendation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /recommend/batch endpoint.
///
/// Runs the pipeline over every submitted employee (after the optional
/// filter). Unmatched or invalid employees are reported in `skipped`.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let employees: Vec<Employee> = request.employees.into_iter().map(Into::into).collect();
    let submitted = employees.len();
    let employees = match &request.filter {
        Some(filter) => filter.apply(employees),
        None => employees,
    };

    info!(
        correlation_id = %correlation_id,
        submitted,
        selected = employees.len(),
        "Processing batch request"
    );

    let cancel = state.shutdown_token().child_token();
    match state.runner().run(employees, &cancel).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                processed = report.results.len(),
                skipped = report.skipped.len(),
                cancelled = report.cancelled,
                "Batch request completed"
            );
            json_response(StatusCode::OK, &BatchResponse::from(report))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Batch request failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /bands endpoint.
///
/// Lists the loaded band policies in match-priority order.
async fn bands_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, &state.config().bands())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, &error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TextGenerator;
    use crate::backend::testing::{FailingGenerator, NO_RAISE_JSON, RAISE_JSON, ScriptedGenerator};
    use crate::config::ConfigLoader;
    use crate::models::{BandPolicy, Decision, RecommendationRow};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state(generator: Arc<dyn TextGenerator>) -> AppState {
        let config = ConfigLoader::load("./config/standard").expect("Failed to load config");
        AppState::new(config, generator)
    }

    fn employee_json(id: &str, region: &str, tenure: u32) -> Value {
        json!({
            "id": id,
            "department": "Sales",
            "position": "Rep",
            "level": "L1",
            "region": region,
            "tenure_years": tenure,
            "current_salary": 30000,
            "manager_eval": 80,
            "peer_eval": 80,
            "client_eval": 80,
            "self_eval": 80
        })
    }

    async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_recommend_valid_request_returns_200() {
        let router = create_router(create_test_state(Arc::new(ScriptedGenerator::always(
            RAISE_JSON,
        ))));

        let body = json!({ "employee": employee_json("E-001", "North", 3) }).to_string();
        let (status, value) = post_json(router, "/recommend", body).await;

        assert_eq!(status, StatusCode::OK);
        let row: RecommendationRow = serde_json::from_value(value).unwrap();
        assert_eq!(row.employee.id, "E-001");
        assert_eq!(row.decision(), Decision::Raise);
        assert_eq!(row.employee.computed_score, Some(rust_decimal::Decimal::new(4, 0)));
    }

    #[tokio::test]
    async fn test_recommend_malformed_json_returns_400() {
        let router = create_router(create_test_state(Arc::new(ScriptedGenerator::always(
            RAISE_JSON,
        ))));

        let (status, value) = post_json(router, "/recommend", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(value).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_recommend_missing_field_returns_400() {
        let router = create_router(create_test_state(Arc::new(ScriptedGenerator::always(
            RAISE_JSON,
        ))));

        let mut employee = employee_json("E-001", "North", 3);
        employee.as_object_mut().unwrap().remove("current_salary");
        let body = json!({ "employee": employee }).to_string();

        let (status, value) = post_json(router, "/recommend", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(value).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("current_salary"));
    }

    #[tokio::test]
    async fn test_recommend_unmatched_employee_returns_422() {
        let router = create_router(create_test_state(Arc::new(ScriptedGenerator::always(
            RAISE_JSON,
        ))));

        let body = json!({ "employee": employee_json("E-404", "Atlantis", 3) }).to_string();
        let (status, value) = post_json(router, "/recommend", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(value["code"], "NO_BAND_MATCH");
    }

    #[tokio::test]
    async fn test_recommend_backend_failure_returns_502() {
        let router = create_router(create_test_state(Arc::new(FailingGenerator { status: 500 })));

        let body = json!({ "employee": employee_json("E-001", "North", 3) }).to_string();
        let (status, value) = post_json(router, "/recommend", body).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(value["code"], "BACKEND_ERROR");
    }

    #[tokio::test]
    async fn test_batch_returns_sheets_and_skips() {
        let router = create_router(create_test_state(Arc::new(ScriptedGenerator::always(
            NO_RAISE_JSON,
        ))));

        let body = json!({
            "employees": [
                employee_json("E-001", "North", 3),
                employee_json("E-002", "Atlantis", 3)
            ]
        })
        .to_string();
        let (status, value) = post_json(router, "/recommend/batch", body).await;

        assert_eq!(status, StatusCode::OK);
        let response: BatchResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.summary.submitted, 2);
        assert_eq!(response.results.len(), 1);
        assert!(response.raises.is_empty());
        assert_eq!(response.no_raises.len(), 1);
        assert_eq!(response.skipped[0].employee_id, "E-002");
        assert!(!response.cancelled);
    }

    #[tokio::test]
    async fn test_batch_applies_filter() {
        let router = create_router(create_test_state(Arc::new(ScriptedGenerator::always(
            RAISE_JSON,
        ))));

        let body = json!({
            "employees": [
                employee_json("E-001", "North", 3),
                employee_json("E-002", "Atlantis", 3)
            ],
            "filter": { "regions": ["North"] }
        })
        .to_string();
        let (status, value) = post_json(router, "/recommend/batch", body).await;

        assert_eq!(status, StatusCode::OK);
        let response: BatchResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.summary.submitted, 1);
        assert!(response.skipped.is_empty());
        assert_eq!(response.raises.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_after_shutdown_is_cancelled() {
        let state = create_test_state(Arc::new(ScriptedGenerator::always(RAISE_JSON)));
        state.shutdown_token().cancel();
        let router = create_router(state);

        let body = json!({ "employees": [employee_json("E-001", "North", 3)] }).to_string();
        let (status, value) = post_json(router, "/recommend/batch", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["cancelled"], true);
        assert_eq!(value["results"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_bands_lists_loaded_bands() {
        let state = create_test_state(Arc::new(ScriptedGenerator::always(RAISE_JSON)));
        let expected = state.config().bands().len();
        let router = create_router(state);

        let response = router
            .oneshot(Request::builder().uri("/bands").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let bands: Vec<BandPolicy> = serde_json::from_slice(&body).unwrap();
        assert_eq!(bands.len(), expected);
        assert_eq!(bands[0].region, "North");
    }
}
