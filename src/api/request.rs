//! Request types for the Compensation Recommendation Engine API.
//!
//! This module defines the JSON request structures for the `/recommend` and
//! `/recommend/batch` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::batch::EmployeeFilter;
use crate::models::Employee;

/// Request body for the `/recommend` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// The employee to review.
    pub employee: EmployeeRequest,
}

/// Request body for the `/recommend/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Employees to review, in output order.
    pub employees: Vec<EmployeeRequest>,
    /// Optional selection applied before the run.
    #[serde(default)]
    pub filter: Option<EmployeeFilter>,
}

/// Employee information in a request.
///
/// Mirrors [`Employee`] without the engine-computed score, which clients
/// cannot set. Spreadsheet column headers are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    #[serde(alias = "EmployeeID")]
    pub id: String,
    /// Department.
    #[serde(alias = "Department")]
    pub department: String,
    /// Position.
    #[serde(alias = "Position")]
    pub position: String,
    /// Level.
    #[serde(alias = "Level")]
    pub level: String,
    /// Region.
    #[serde(alias = "Region")]
    pub region: String,
    /// Tenure in years.
    #[serde(alias = "Tenure")]
    pub tenure_years: Decimal,
    /// Current annual salary.
    #[serde(alias = "CurrentSalary")]
    pub current_salary: Decimal,
    /// Manager evaluation, 0-100.
    #[serde(default, alias = "ManagerEval")]
    pub manager_eval: Option<Decimal>,
    /// Peer evaluation, 0-100.
    #[serde(default, alias = "PeerEval")]
    pub peer_eval: Option<Decimal>,
    /// Client evaluation, 0-100.
    #[serde(default, alias = "ClientEval")]
    pub client_eval: Option<Decimal>,
    /// Self evaluation, 0-100.
    #[serde(default, alias = "SelfEval")]
    pub self_eval: Option<Decimal>,
    /// Composite score from the source system, 0-5.
    #[serde(default, alias = "CompositeScore")]
    pub composite_score: Option<Decimal>,
    /// Strong competencies, free text.
    #[serde(default, alias = "StrongCompetencies")]
    pub strong_competencies: Option<String>,
    /// Weak competencies, free text.
    #[serde(default, alias = "WeakCompetencies")]
    pub weak_competencies: Option<String>,
    /// Salary position against the market, in percent.
    #[serde(default, alias = "MarketBenchmark")]
    pub market_benchmark: Option<Decimal>,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            department: req.department,
            position: req.position,
            level: req.level,
            region: req.region,
            tenure_years: req.tenure_years,
            current_salary: req.current_salary,
            manager_eval: req.manager_eval,
            peer_eval: req.peer_eval,
            client_eval: req.client_eval,
            self_eval: req.self_eval,
            composite_score: req.composite_score,
            computed_score: None,
            strong_competencies: req.strong_competencies,
            weak_competencies: req.weak_competencies,
            market_benchmark: req.market_benchmark,
        }
    }
}
