//! Batch result models.
//!
//! This module contains the [`RecommendationRow`] emitted per employee and the
//! [`BatchReport`] that aggregates a run, along with the three groupings the
//! HR output is organised by (all results, raises, training plans).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Decision, Employee, FallbackReason, Provenance, Recommendation};

/// A warning attached to a result row.
///
/// Warnings flag inconsistencies that do not invalidate the recommendation
/// but should be reviewed by a person.
///
/// # Example
///
/// ```
/// use compensation_engine::models::AuditWarning;
///
/// let warning = AuditWarning::new("AMBIGUOUS_BAND", "2 bands matched", "medium");
/// assert_eq!(warning.code, "AMBIGUOUS_BAND");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// One output row: the employee's fields followed by the recommendation's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    /// The employee, including the computed composite score.
    #[serde(flatten)]
    pub employee: Employee,
    /// The recommendation.
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// Whether the recommendation came from the backend or the fallback path.
    pub provenance: Provenance,
    /// Set when `provenance` is `fallback`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    /// Consistency warnings for human review.
    #[serde(default)]
    pub warnings: Vec<AuditWarning>,
}

impl RecommendationRow {
    /// Shorthand for the row's decision.
    pub fn decision(&self) -> Decision {
        self.recommendation.decision
    }

    /// Returns true if the row came from the fallback path.
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

/// Why an employee was left out of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The composite score could not be computed.
    InvalidScore,
    /// No band policy matched.
    NoBandMatch,
    /// The prompt could not be built from the employee and band data.
    IncompleteData,
}

/// An employee excluded from a batch's outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The employee's ID.
    pub employee_id: String,
    /// The category of the skip.
    pub reason: SkipReason,
    /// The underlying error message.
    pub message: String,
}

/// Counts summarising a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Employees submitted.
    pub submitted: usize,
    /// Rows produced.
    pub processed: usize,
    /// Employees skipped.
    pub skipped: usize,
    /// Rows with a RAISE decision.
    pub raises: usize,
    /// Rows with a NO_RAISE decision.
    pub no_raises: usize,
    /// Rows produced by the fallback path (a subset of `no_raises`).
    pub fallbacks: usize,
}

/// The complete result of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// The version of the engine that produced the run.
    pub engine_version: String,
    /// Number of employees submitted.
    pub submitted: usize,
    /// Result rows, in input order.
    pub results: Vec<RecommendationRow>,
    /// Employees excluded from the results.
    pub skipped: Vec<SkippedEmployee>,
    /// True if the run was cancelled before every employee was processed.
    pub cancelled: bool,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

impl BatchReport {
    /// Rows with a RAISE decision, in input order.
    pub fn raises(&self) -> impl Iterator<Item = &RecommendationRow> {
        self.results
            .iter()
            .filter(|row| row.decision() == Decision::Raise)
    }

    /// Rows with a NO_RAISE decision, in input order.
    pub fn no_raises(&self) -> impl Iterator<Item = &RecommendationRow> {
        self.results
            .iter()
            .filter(|row| row.decision() == Decision::NoRaise)
    }

    /// Rows produced by the fallback path.
    pub fn fallbacks(&self) -> impl Iterator<Item = &RecommendationRow> {
        self.results.iter().filter(|row| row.is_fallback())
    }

    /// Returns summary counts for the run.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            submitted: self.submitted,
            processed: self.results.len(),
            skipped: self.skipped.len(),
            raises: self.raises().count(),
            no_raises: self.no_raises().count(),
            fallbacks: self.fallbacks().count(),
        }
    }

    /// Returns the three output groupings.
    pub fn sheets(&self) -> RecommendationSheets {
        RecommendationSheets {
            all: self.results.clone(),
            raises: self.raises().cloned().collect(),
            no_raises: self.no_raises().cloned().collect(),
        }
    }
}

/// The three logical output sheets of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSheets {
    /// Every result row.
    pub all: Vec<RecommendationRow>,
    /// RAISE rows.
    pub raises: Vec<RecommendationRow>,
    /// NO_RAISE rows, fallbacks included.
    pub no_raises: Vec<RecommendationRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryMode, TrainingCourse};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            department: "Sales".to_string(),
            position: "Rep".to_string(),
            level: "L1".to_string(),
            region: "North".to_string(),
            tenure_years: dec("3"),
            current_salary: dec("30000"),
            manager_eval: Some(dec("80")),
            peer_eval: Some(dec("80")),
            client_eval: Some(dec("80")),
            self_eval: Some(dec("80")),
            composite_score: None,
            computed_score: Some(dec("4.0")),
            strong_competencies: None,
            weak_competencies: None,
            market_benchmark: None,
        }
    }

    fn raise_row(id: &str) -> RecommendationRow {
        RecommendationRow {
            employee: employee(id),
            recommendation: Recommendation {
                decision: Decision::Raise,
                raise_percentage: Some(dec("4")),
                new_salary: Some(dec("31200")),
                justification: "Strong year.".to_string(),
                training_plan: None,
            },
            provenance: Provenance::Model,
            fallback_reason: None,
            warnings: vec![],
        }
    }

    fn training_row(id: &str) -> RecommendationRow {
        let course = TrainingCourse {
            name: "Structured negotiation".to_string(),
            competency: "negotiation".to_string(),
            hours: dec("12"),
            delivery_mode: DeliveryMode::Online,
            justification: "Close the gap".to_string(),
        };
        RecommendationRow {
            employee: employee(id),
            recommendation: Recommendation {
                decision: Decision::NoRaise,
                raise_percentage: None,
                new_salary: None,
                justification: "Below target.".to_string(),
                training_plan: Some(vec![course.clone(), course.clone(), course]),
            },
            provenance: Provenance::Model,
            fallback_reason: None,
            warnings: vec![],
        }
    }

    fn fallback_row(id: &str) -> RecommendationRow {
        RecommendationRow {
            employee: employee(id),
            recommendation: Recommendation::fallback("not json"),
            provenance: Provenance::Fallback,
            fallback_reason: Some(FallbackReason::Undecodable("expected value".to_string())),
            warnings: vec![],
        }
    }

    fn report(rows: Vec<RecommendationRow>) -> BatchReport {
        BatchReport {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            engine_version: "0.1.0".to_string(),
            submitted: rows.len() + 1,
            results: rows,
            skipped: vec![SkippedEmployee {
                employee_id: "E-999".to_string(),
                reason: SkipReason::NoBandMatch,
                message: "No salary band matches employee 'E-999'".to_string(),
            }],
            cancelled: false,
            duration_ms: 5,
        }
    }

    #[test]
    fn test_row_serializes_employee_and_recommendation_fields_flat() {
        let json = serde_json::to_value(raise_row("E-001")).unwrap();
        assert_eq!(json["id"], "E-001");
        assert_eq!(json["department"], "Sales");
        assert_eq!(json["decision"], "RAISE");
        assert_eq!(json["provenance"], "model");
        assert!(json.get("fallback_reason").is_none());
        assert!(json["training_plan"].is_null());
    }

    #[test]
    fn test_row_round_trips_through_json() {
        let row = training_row("E-002");
        let json = serde_json::to_string(&row).unwrap();
        let back: RecommendationRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_groupings_partition_by_decision() {
        let report = report(vec![
            raise_row("E-001"),
            training_row("E-002"),
            fallback_row("E-003"),
            raise_row("E-004"),
        ]);

        let raises: Vec<&str> = report.raises().map(|r| r.employee.id.as_str()).collect();
        let no_raises: Vec<&str> = report.no_raises().map(|r| r.employee.id.as_str()).collect();

        assert_eq!(raises, vec!["E-001", "E-004"]);
        assert_eq!(no_raises, vec!["E-002", "E-003"]);
        assert_eq!(raises.len() + no_raises.len(), report.results.len());
    }

    #[test]
    fn test_summary_counts() {
        let report = report(vec![raise_row("E-001"), fallback_row("E-002")]);
        let summary = report.summary();

        assert_eq!(summary.submitted, 3);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.raises, 1);
        assert_eq!(summary.no_raises, 1);
        assert_eq!(summary.fallbacks, 1);
    }

    #[test]
    fn test_sheets_mirror_groupings() {
        let report = report(vec![raise_row("E-001"), training_row("E-002")]);
        let sheets = report.sheets();

        assert_eq!(sheets.all.len(), 2);
        assert_eq!(sheets.raises.len(), 1);
        assert_eq!(sheets.no_raises.len(), 1);
        assert_eq!(sheets.raises[0].employee.id, "E-001");
    }
}
