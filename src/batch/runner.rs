//! Batch and single-record recommendation runs.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{BandMatch, apply_composite_score, match_band};
use crate::config::{BackendFailurePolicy, EngineSettings, ScoringSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditWarning, BandPolicy, BatchReport, Decision, Employee, FallbackReason, Recommendation,
    RecommendationOutcome, RecommendationRow, SkipReason, SkippedEmployee,
};
use crate::recommendation::{RecommendationEngine, build_prompt};

/// Warning code: more than one band matched the employee.
pub const AMBIGUOUS_BAND: &str = "AMBIGUOUS_BAND";
/// Warning code: the raise lies outside the band's policy range.
pub const RAISE_OUTSIDE_POLICY: &str = "RAISE_OUTSIDE_POLICY";
/// Warning code: the new salary disagrees with current salary and percentage.
pub const NEW_SALARY_MISMATCH: &str = "NEW_SALARY_MISMATCH";
/// Warning code: the resulting salary is above the band's maximum.
pub const SALARY_ABOVE_BAND: &str = "SALARY_ABOVE_BAND";

/// A record that is ready to be sent to the engine.
struct Prepared<'a> {
    band_match: BandMatch<'a>,
    prompt: String,
}

/// Runs the scoring, band matching, prompting and recommendation pipeline.
///
/// The band collection is read-only and shared; records are processed one
/// at a time in input order.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    engine: RecommendationEngine,
    bands: Arc<[BandPolicy]>,
    scoring: ScoringSettings,
    on_backend_failure: BackendFailurePolicy,
}

impl BatchRunner {
    /// Creates a runner over a band collection.
    pub fn new(
        engine: RecommendationEngine,
        bands: Arc<[BandPolicy]>,
        settings: &EngineSettings,
    ) -> Self {
        Self {
            engine,
            bands,
            scoring: settings.scoring,
            on_backend_failure: settings.batch.on_backend_failure,
        }
    }

    /// The band collection the runner matches against.
    pub fn bands(&self) -> &[BandPolicy] {
        &self.bands
    }

    /// Produces a recommendation for a single employee.
    ///
    /// Unlike [`BatchRunner::run`], every failure is returned: invalid data,
    /// a missing band match and backend errors alike.
    pub async fn recommend_one(&self, mut employee: Employee) -> EngineResult<RecommendationRow> {
        let prepared = self
            .prepare(&mut employee)
            .map_err(|(_, error)| error)?;

        let outcome = self.engine.recommend(&prepared.prompt).await?;
        let row = build_row(employee, &prepared.band_match, outcome);

        info!(
            employee_id = %row.employee.id,
            decision = %row.decision(),
            provenance = ?row.provenance,
            warnings = row.warnings.len(),
            "Recommendation generated"
        );

        Ok(row)
    }

    /// Runs the pipeline over every employee, in input order.
    ///
    /// Employees whose data is invalid or who match no band are skipped and
    /// listed in the report. Backend failures abort the run or degrade to
    /// fallback rows depending on the configured [`BackendFailurePolicy`].
    ///
    /// Cancellation is checked before each employee and while waiting on the
    /// backend; a cancelled run returns the rows produced so far with
    /// `cancelled` set.
    pub async fn run(
        &self,
        employees: Vec<Employee>,
        cancel: &CancellationToken,
    ) -> EngineResult<BatchReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        let submitted = employees.len();

        info!(run_id = %run_id, employees = submitted, "Starting batch run");

        let mut results = Vec::with_capacity(submitted);
        let mut skipped = Vec::new();
        let mut cancelled = false;

        for mut employee in employees {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let prepared = match self.prepare(&mut employee) {
                Ok(prepared) => prepared,
                Err((reason, error)) => {
                    warn!(
                        run_id = %run_id,
                        employee_id = %employee.id,
                        reason = ?reason,
                        error = %error,
                        "Skipping employee"
                    );
                    skipped.push(SkippedEmployee {
                        employee_id: employee.id,
                        reason,
                        message: error.to_string(),
                    });
                    continue;
                }
            };

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.engine.recommend(&prepared.prompt) => Some(result),
            };
            let Some(result) = result else {
                cancelled = true;
                break;
            };

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(backend_error) => match self.on_backend_failure {
                    BackendFailurePolicy::Abort => {
                        error!(
                            run_id = %run_id,
                            employee_id = %employee.id,
                            error = %backend_error,
                            "Backend failure, aborting run"
                        );
                        return Err(backend_error.into());
                    }
                    BackendFailurePolicy::Degrade => {
                        warn!(
                            run_id = %run_id,
                            employee_id = %employee.id,
                            error = %backend_error,
                            "Backend failure, recording fallback"
                        );
                        RecommendationOutcome::Fallback {
                            recommendation: Recommendation::fallback(format!(
                                "Recommendation unavailable: {}",
                                backend_error
                            )),
                            reason: FallbackReason::BackendUnavailable(backend_error.to_string()),
                        }
                    }
                },
            };

            results.push(build_row(employee, &prepared.band_match, outcome));
        }

        let report = BatchReport {
            run_id,
            started_at,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            submitted,
            results,
            skipped,
            cancelled,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let summary = report.summary();
        if summary.processed > 0 && summary.fallbacks == summary.processed {
            warn!(
                run_id = %run_id,
                fallbacks = summary.fallbacks,
                "Every recommendation in the run is a fallback"
            );
        }
        info!(
            run_id = %run_id,
            processed = summary.processed,
            skipped = summary.skipped,
            raises = summary.raises,
            no_raises = summary.no_raises,
            fallbacks = summary.fallbacks,
            cancelled = report.cancelled,
            duration_ms = report.duration_ms,
            "Batch run finished"
        );

        Ok(report)
    }

    /// Scores, matches and builds the prompt for an employee. On failure,
    /// returns the skip category together with the error.
    fn prepare(&self, employee: &mut Employee) -> Result<Prepared<'_>, (SkipReason, EngineError)> {
        if employee.computed_score.is_none() {
            apply_composite_score(employee, &self.scoring)
                .map_err(|error| (SkipReason::InvalidScore, error))?;
        }

        let band_match = match_band(employee, &self.bands).ok_or_else(|| {
            (
                SkipReason::NoBandMatch,
                EngineError::NoBandMatch {
                    employee_id: employee.id.clone(),
                },
            )
        })?;

        let prompt = build_prompt(employee, band_match.band, self.scoring.authority)
            .map_err(|error| (SkipReason::IncompleteData, error))?;

        Ok(Prepared { band_match, prompt })
    }
}

fn build_row(
    employee: Employee,
    band_match: &BandMatch<'_>,
    outcome: RecommendationOutcome,
) -> RecommendationRow {
    let (recommendation, provenance, fallback_reason) = outcome.into_parts();
    let warnings = consistency_warnings(&employee, band_match, &recommendation);

    RecommendationRow {
        employee,
        recommendation,
        provenance,
        fallback_reason,
        warnings,
    }
}

/// Flags inconsistencies between a recommendation and the employee's band.
pub fn consistency_warnings(
    employee: &Employee,
    band_match: &BandMatch<'_>,
    recommendation: &Recommendation,
) -> Vec<AuditWarning> {
    let band = band_match.band;
    let mut warnings = Vec::new();

    if band_match.is_ambiguous() {
        warnings.push(AuditWarning::new(
            AMBIGUOUS_BAND,
            format!(
                "{} bands matched; using band #{} ({})",
                band_match.candidate_count,
                band_match.position + 1,
                band.label()
            ),
            "medium",
        ));
    }

    let mut resulting_salary = employee.current_salary;

    if recommendation.decision == Decision::Raise {
        if let Some(percentage) = recommendation.raise_percentage {
            let below = band.raise_policy_min.is_some_and(|min| percentage < min);
            let above = band.raise_policy_max.is_some_and(|max| percentage > max);
            if below || above {
                warnings.push(AuditWarning::new(
                    RAISE_OUTSIDE_POLICY,
                    format!(
                        "Raise of {}% is outside the policy range {}",
                        percentage.normalize(),
                        policy_range(band)
                    ),
                    "high",
                ));
            }

            if let Some(new_salary) = recommendation.new_salary {
                // Values come from the backend and may overflow
                let expected = percentage
                    .checked_div(Decimal::ONE_HUNDRED)
                    .and_then(|fraction| Decimal::ONE.checked_add(fraction))
                    .and_then(|factor| employee.current_salary.checked_mul(factor));
                let difference = expected
                    .and_then(|expected| new_salary.checked_sub(expected))
                    .map(|difference| difference.abs());

                if !difference.is_some_and(|difference| difference <= Decimal::ONE) {
                    let message = match expected {
                        Some(expected) => format!(
                            "New salary {} differs from the expected {}",
                            new_salary.normalize(),
                            expected.round_dp(2).normalize()
                        ),
                        None => format!(
                            "New salary {} cannot be checked against a {}% raise",
                            new_salary.normalize(),
                            percentage.normalize()
                        ),
                    };
                    warnings.push(AuditWarning::new(NEW_SALARY_MISMATCH, message, "medium"));
                }
            }
        }

        if let Some(new_salary) = recommendation.new_salary {
            resulting_salary = new_salary;
        }
    }

    if let Some(max) = band.salary_range_max {
        if resulting_salary > max {
            warnings.push(AuditWarning::new(
                SALARY_ABOVE_BAND,
                format!(
                    "Salary {} is above the band maximum {}",
                    resulting_salary.normalize(),
                    max.normalize()
                ),
                "medium",
            ));
        }
    }

    warnings
}

fn policy_range(band: &BandPolicy) -> String {
    let bound = |value: Option<Decimal>| {
        value
            .map(|v| format!("{}%", v.normalize()))
            .unwrap_or_else(|| "?".to_string())
    };
    format!("[{}, {}]", bound(band.raise_policy_min), bound(band.raise_policy_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TextGenerator;
    use crate::backend::testing::{
        FailingGenerator, NO_RAISE_JSON, PendingGenerator, RAISE_JSON, ScriptedGenerator,
    };
    use crate::config::ScoreAuthority;
    use crate::error::BackendError;
    use crate::models::Provenance;
    use std::str::FromStr;
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, region: &str, tenure: &str) -> Employee {
        Employee {
            id: id.to_string(),
            department: "Sales".to_string(),
            position: "Rep".to_string(),
            level: "L1".to_string(),
            region: region.to_string(),
            tenure_years: dec(tenure),
            current_salary: dec("30000"),
            manager_eval: Some(dec("80")),
            peer_eval: Some(dec("80")),
            client_eval: Some(dec("80")),
            self_eval: Some(dec("80")),
            composite_score: None,
            computed_score: None,
            strong_competencies: None,
            weak_competencies: None,
            market_benchmark: Some(dec("-3")),
        }
    }

    fn band(region: &str, tenure_min: &str, tenure_max: &str) -> BandPolicy {
        BandPolicy {
            department: "Sales".to_string(),
            position: "Rep".to_string(),
            level: "L1".to_string(),
            region: region.to_string(),
            tenure_min: dec(tenure_min),
            tenure_max: dec(tenure_max),
            salary_range_min: Some(dec("25000")),
            salary_range_max: Some(dec("35000")),
            raise_policy_min: Some(dec("2")),
            raise_policy_max: Some(dec("6")),
        }
    }

    fn bands() -> Arc<[BandPolicy]> {
        Arc::from(vec![band("North", "0", "5"), band("South", "0", "40")])
    }

    fn runner_with(
        generator: Arc<dyn TextGenerator>,
        policy: BackendFailurePolicy,
    ) -> BatchRunner {
        let mut settings = EngineSettings::default();
        settings.batch.on_backend_failure = policy;
        let engine = RecommendationEngine::new(generator, &settings.backend);
        BatchRunner::new(engine, bands(), &settings)
    }

    fn runner(generator: Arc<dyn TextGenerator>) -> BatchRunner {
        runner_with(generator, BackendFailurePolicy::Abort)
    }

    #[tokio::test]
    async fn test_recommend_one_scores_matches_and_parses() {
        let runner = runner(Arc::new(ScriptedGenerator::always(RAISE_JSON)));

        let row = runner
            .recommend_one(employee("E-001", "North", "3"))
            .await
            .unwrap();

        assert_eq!(row.employee.computed_score, Some(dec("4")));
        assert_eq!(row.decision(), Decision::Raise);
        assert_eq!(row.provenance, Provenance::Model);
        assert!(row.warnings.is_empty(), "unexpected warnings: {:?}", row.warnings);
    }

    #[tokio::test]
    async fn test_recommend_one_returns_no_band_match() {
        let runner = runner(Arc::new(ScriptedGenerator::always(RAISE_JSON)));

        let result = runner.recommend_one(employee("E-404", "West", "3")).await;

        match result {
            Err(EngineError::NoBandMatch { employee_id }) => assert_eq!(employee_id, "E-404"),
            other => panic!("Expected NoBandMatch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommend_one_returns_data_errors() {
        let runner = runner(Arc::new(ScriptedGenerator::always(RAISE_JSON)));
        let mut invalid = employee("E-002", "North", "3");
        invalid.peer_eval = None;

        let result = runner.recommend_one(invalid).await;
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
    }

    #[tokio::test]
    async fn test_recommend_one_returns_backend_errors() {
        let runner = runner_with(
            Arc::new(FailingGenerator { status: 503 }),
            BackendFailurePolicy::Degrade,
        );

        let result = runner.recommend_one(employee("E-001", "North", "3")).await;
        assert!(matches!(result, Err(EngineError::Backend(_))));
    }

    #[tokio::test]
    async fn test_unmatched_employee_is_skipped_not_failed() {
        let runner = runner(Arc::new(ScriptedGenerator::always(NO_RAISE_JSON)));
        let employees = vec![
            employee("E-001", "North", "3"),
            employee("E-002", "West", "3"),
            employee("E-003", "South", "12"),
        ];

        let report = runner.run(employees, &CancellationToken::new()).await.unwrap();

        let ids: Vec<&str> = report.results.iter().map(|r| r.employee.id.as_str()).collect();
        assert_eq!(ids, vec!["E-001", "E-003"]);
        assert!(report.raises().all(|r| r.employee.id != "E-002"));
        assert!(report.no_raises().all(|r| r.employee.id != "E-002"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].employee_id, "E-002");
        assert_eq!(report.skipped[0].reason, SkipReason::NoBandMatch);
        assert!(!report.cancelled);
    }

    #[tokio::test]
    async fn test_invalid_and_incomplete_records_are_skipped() {
        let runner = runner(Arc::new(ScriptedGenerator::always(NO_RAISE_JSON)));

        let mut unscored = employee("E-001", "North", "3");
        unscored.manager_eval = Some(dec("140"));

        let incomplete_bands: Arc<[BandPolicy]> = Arc::from(vec![BandPolicy {
            salary_range_max: None,
            ..band("North", "0", "5")
        }]);
        let incomplete_runner = BatchRunner {
            bands: incomplete_bands,
            ..runner.clone()
        };

        let report = runner
            .run(vec![unscored], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.skipped[0].reason, SkipReason::InvalidScore);

        let report = incomplete_runner
            .run(vec![employee("E-002", "North", "3")], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.skipped[0].reason, SkipReason::IncompleteData);
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn test_groupings_partition_results() {
        let generator = ScriptedGenerator::sequence(
            vec![
                Ok(RAISE_JSON.to_string()),
                Ok(NO_RAISE_JSON.to_string()),
                Ok("not json at all".to_string()),
            ],
            RAISE_JSON,
        );
        let runner = runner(Arc::new(generator));
        let employees = vec![
            employee("E-001", "North", "1"),
            employee("E-002", "North", "2"),
            employee("E-003", "North", "3"),
            employee("E-004", "North", "4"),
        ];

        let report = runner.run(employees, &CancellationToken::new()).await.unwrap();

        let raises: Vec<&str> = report.raises().map(|r| r.employee.id.as_str()).collect();
        let no_raises: Vec<&str> = report.no_raises().map(|r| r.employee.id.as_str()).collect();
        assert_eq!(raises, vec!["E-001", "E-004"]);
        assert_eq!(no_raises, vec!["E-002", "E-003"]);
        assert_eq!(report.summary().fallbacks, 1);
        assert_eq!(report.results[2].provenance, Provenance::Fallback);
    }

    #[tokio::test]
    async fn test_abort_policy_returns_backend_error() {
        let runner = runner(Arc::new(FailingGenerator { status: 500 }));

        let result = runner
            .run(vec![employee("E-001", "North", "3")], &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(EngineError::Backend(BackendError::Api { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_degrade_policy_turns_outage_into_fallback_storm() {
        let runner = runner_with(
            Arc::new(FailingGenerator { status: 503 }),
            BackendFailurePolicy::Degrade,
        );
        let employees = vec![
            employee("E-001", "North", "1"),
            employee("E-002", "North", "2"),
            employee("E-003", "South", "9"),
        ];

        let report = runner.run(employees, &CancellationToken::new()).await.unwrap();
        let summary = report.summary();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.no_raises, 3);
        assert_eq!(summary.fallbacks, 3);
        for row in &report.results {
            assert!(row.is_fallback());
            assert!(matches!(
                row.fallback_reason,
                Some(FallbackReason::BackendUnavailable(_))
            ));
            assert!(row.recommendation.training_plan.is_none());
        }
    }

    #[tokio::test]
    async fn test_blank_reply_becomes_fallback_under_abort_policy() {
        let runner = runner(Arc::new(ScriptedGenerator::always("   ")));

        let report = runner
            .run(vec![employee("E-001", "North", "3")], &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.results.len(), 1);
        let row = &report.results[0];
        assert!(row.is_fallback());
        assert_eq!(row.decision(), Decision::NoRaise);
        assert!(matches!(
            row.fallback_reason,
            Some(FallbackReason::Undecodable(_))
        ));
    }

    #[tokio::test]
    async fn test_huge_raise_percentage_does_not_abort_run() {
        let reply = r#"{"decision": "RAISE", "raise_percentage": 1e27, "new_salary": 31200,
            "justification": "Exceptional.", "training_plan": null}"#;
        let runner = runner(Arc::new(ScriptedGenerator::always(reply)));

        let report = runner
            .run(
                vec![employee("E-001", "North", "3"), employee("E-002", "South", "9")],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.summary().fallbacks, 2);
        assert!(matches!(
            report.results[0].fallback_reason,
            Some(FallbackReason::InvalidRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_run_is_idempotent_with_deterministic_backend() {
        let runner = runner(Arc::new(ScriptedGenerator::always(RAISE_JSON)));
        let employees = vec![
            employee("E-001", "North", "3"),
            employee("E-002", "West", "3"),
            employee("E-003", "South", "7"),
        ];

        let first = runner
            .run(employees.clone(), &CancellationToken::new())
            .await
            .unwrap();
        let second = runner.run(employees, &CancellationToken::new()).await.unwrap();

        assert_eq!(first.results, second.results);
        assert_eq!(first.skipped, second.skipped);
        assert_ne!(first.run_id, second.run_id);
    }

    #[tokio::test]
    async fn test_pre_cancelled_run_processes_nothing() {
        let runner = runner(Arc::new(ScriptedGenerator::always(RAISE_JSON)));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = runner
            .run(vec![employee("E-001", "North", "3")], &cancel)
            .await
            .unwrap();

        assert!(report.cancelled);
        assert!(report.results.is_empty());
        assert_eq!(report.submitted, 1);
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_in_flight_call() {
        let runner = runner(Arc::new(PendingGenerator));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let report = tokio::time::timeout(
            Duration::from_secs(5),
            runner.run(vec![employee("E-001", "North", "3")], &cancel),
        )
        .await
        .expect("run did not observe cancellation")
        .unwrap();

        assert!(report.cancelled);
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn test_supplied_score_is_used_in_prompt() {
        let generator = Arc::new(ScriptedGenerator::always(RAISE_JSON));
        let mut settings = EngineSettings::default();
        settings.scoring.authority = ScoreAuthority::Supplied;
        let engine = RecommendationEngine::new(generator.clone(), &settings.backend);
        let runner = BatchRunner::new(engine, bands(), &settings);

        let mut supplied = employee("E-001", "North", "3");
        supplied.composite_score = Some(dec("2.75"));
        runner.recommend_one(supplied).await.unwrap();

        let prompt = &generator.requests()[0].prompt;
        assert!(prompt.contains("Composite score (0-5): 2.75\n"));
    }

    fn raise(percentage: &str, new_salary: &str) -> Recommendation {
        Recommendation {
            decision: Decision::Raise,
            raise_percentage: Some(dec(percentage)),
            new_salary: Some(dec(new_salary)),
            justification: "Strong year.".to_string(),
            training_plan: None,
        }
    }

    fn single_match(band: &BandPolicy) -> BandMatch<'_> {
        BandMatch {
            band,
            position: 0,
            candidate_count: 1,
        }
    }

    fn codes(warnings: &[AuditWarning]) -> Vec<&str> {
        warnings.iter().map(|w| w.code.as_str()).collect()
    }

    #[test]
    fn test_consistent_raise_has_no_warnings() {
        let band = band("North", "0", "5");
        let warnings = consistency_warnings(
            &employee("E-001", "North", "3"),
            &single_match(&band),
            &raise("4", "31200"),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_raise_outside_policy_is_flagged() {
        let band = band("North", "0", "5");
        let warnings = consistency_warnings(
            &employee("E-001", "North", "3"),
            &single_match(&band),
            &raise("8", "32400"),
        );
        assert_eq!(codes(&warnings), vec![RAISE_OUTSIDE_POLICY]);
    }

    #[test]
    fn test_new_salary_mismatch_tolerates_one_unit() {
        let band = band("North", "0", "5");
        let employee = employee("E-001", "North", "3");

        let within = consistency_warnings(&employee, &single_match(&band), &raise("4", "31201"));
        assert!(within.is_empty());

        let beyond = consistency_warnings(&employee, &single_match(&band), &raise("4", "31500"));
        assert_eq!(codes(&beyond), vec![NEW_SALARY_MISMATCH]);
    }

    #[test]
    fn test_overflowing_raise_is_flagged_instead_of_computed() {
        let band = band("North", "0", "5");
        let warnings = consistency_warnings(
            &employee("E-001", "North", "3"),
            &single_match(&band),
            &raise("1000000000000000000000000000", "31200"),
        );

        assert_eq!(codes(&warnings), vec![RAISE_OUTSIDE_POLICY, NEW_SALARY_MISMATCH]);
        assert!(warnings[1].message.contains("cannot be checked"));
    }

    #[test]
    fn test_salary_above_band_is_flagged() {
        let band = band("North", "0", "5");
        let mut employee = employee("E-001", "North", "3");
        employee.current_salary = dec("34000");

        let warnings = consistency_warnings(&employee, &single_match(&band), &raise("4", "35360"));
        assert_eq!(codes(&warnings), vec![SALARY_ABOVE_BAND]);
    }

    #[test]
    fn test_ambiguous_band_is_flagged() {
        let band = band("North", "0", "5");
        let ambiguous = BandMatch {
            band: &band,
            position: 0,
            candidate_count: 2,
        };

        let warnings = consistency_warnings(
            &employee("E-001", "North", "3"),
            &ambiguous,
            &Recommendation::fallback("n/a"),
        );

        assert_eq!(codes(&warnings), vec![AMBIGUOUS_BAND]);
        assert!(warnings[0].message.contains("2 bands matched"));
    }
}
