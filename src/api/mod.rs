//! HTTP API module for the Compensation Recommendation Engine.
//!
//! This module provides the REST API endpoints for running single and batch
//! recommendations and for inspecting the loaded band table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchRequest, EmployeeRequest, RecommendRequest};
pub use response::{ApiError, ApiErrorResponse, BatchResponse};
pub use state::AppState;
