//! Employee model.
//!
//! Field names follow the engine's snake_case JSON shape. The column headers
//! of the HR spreadsheet export ("EmployeeID", "ManagerEval", ...) are
//! accepted as aliases so exported rows deserialize unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ScoreAuthority;

/// An employee record subject to a compensation review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    #[serde(alias = "EmployeeID")]
    pub id: String,
    /// Department (band key).
    #[serde(alias = "Department")]
    pub department: String,
    /// Position (band key).
    #[serde(alias = "Position")]
    pub position: String,
    /// Level (band key).
    #[serde(alias = "Level")]
    pub level: String,
    /// Region (band key).
    #[serde(alias = "Region")]
    pub region: String,
    /// Tenure in years; may be fractional.
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
    /// Composite score supplied by the source system, 0-5.
    #[serde(default, alias = "CompositeScore")]
    pub composite_score: Option<Decimal>,
    /// Composite score computed by the engine, 0-5.
    #[serde(default)]
    pub computed_score: Option<Decimal>,
    /// Free-text list of strong competencies.
    #[serde(default, alias = "StrongCompetencies")]
    pub strong_competencies: Option<String>,
    /// Free-text list of weak competencies.
    #[serde(default, alias = "WeakCompetencies")]
    pub weak_competencies: Option<String>,
    /// Salary position against the market, in percent.
    #[serde(default, alias = "MarketBenchmark")]
    pub market_benchmark: Option<Decimal>,
}

impl Employee {
    /// Returns the composite score that the given authority treats as
    /// authoritative, falling back to the other field when it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use compensation_engine::config::ScoreAuthority;
    /// use compensation_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee: Employee = serde_json::from_str(r#"{
    ///     "id": "E-001", "department": "Sales", "position": "Rep",
    ///     "level": "L1", "region": "North",
    ///     "tenure_years": "3", "current_salary": "30000"
    /// }"#).unwrap();
    /// employee.composite_score = Some(Decimal::new(35, 1));
    /// employee.computed_score = Some(Decimal::new(41, 1));
    ///
    /// assert_eq!(employee.effective_score(ScoreAuthority::Computed), Some(Decimal::new(41, 1)));
    /// assert_eq!(employee.effective_score(ScoreAuthority::Supplied), Some(Decimal::new(35, 1)));
    /// ```
    pub fn effective_score(&self, authority: ScoreAuthority) -> Option<Decimal> {
        match authority {
            ScoreAuthority::Supplied => self.composite_score.or(self.computed_score),
            ScoreAuthority::Computed | ScoreAuthority::Overwrite => {
                self.computed_score.or(self.composite_score)
            }
        }
    }
}
