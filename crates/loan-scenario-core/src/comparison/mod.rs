//! Scenario comparison: per-loan details, per-scenario aggregation, and
//! cross-scenario ranking, plus the envelope operations consumed by the
//! CLI and the JS bindings.

pub mod loan;
pub mod ranking;
pub mod scenario;

pub use loan::{loan_details, LoanDetails};
pub use ranking::{pick_best, with_savings, ScenarioSavings};
pub use scenario::{compute_all, compute_scenario, ScenarioResult};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::error::LoanScenarioError;
use crate::types::{with_metadata, ComputationOutput, Scenario};
use crate::LoanScenarioResult;

const METHODOLOGY: &str = "Annuity amortization with quarterly compounding and monthly payments; \
     effective rate via Newton-Raphson IRR on the kurs-adjusted advance";

fn assumptions() -> serde_json::Value {
    serde_json::json!({
        "compounding_periods_per_year": 4,
        "payments_per_year": 12,
        "irr_initial_guess": "0.01",
        "irr_max_iterations": 100,
        "irr_convergence_threshold": "1e-7",
    })
}

/// Input for a full comparison pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonInput {
    pub scenarios: Vec<Scenario>,
}

/// Output of a full comparison pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOutput {
    /// One result per scenario, in input order
    pub results: Vec<ScenarioResult>,
    /// Id of the scenario with the lowest total cost
    pub best_scenario_id: Option<String>,
    /// Savings ranking; empty when fewer than two scenarios were compared
    pub savings: Vec<ScenarioSavings>,
}

/// Compare a set of scenarios and rank them by total cost.
///
/// This is the boundary operation: it validates the scenario set, runs
/// the pure recompute pass, and surfaces every effective-rate fallback
/// as a warning so a nominal rate is never silently presented as an
/// effective one.
pub fn compare_scenarios(
    input: &ComparisonInput,
) -> LoanScenarioResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    if input.scenarios.is_empty() {
        return Err(LoanScenarioError::InsufficientData(
            "At least one scenario required".into(),
        ));
    }
    validate_unique_ids(&input.scenarios)?;

    let results = compute_all(&input.scenarios);
    let warnings = fallback_warnings(&results);

    let best_scenario_id = pick_best(&results).map(|r| r.scenario_id.clone());
    let savings = with_savings(&results);

    let output = ComparisonOutput {
        results,
        best_scenario_id,
        savings,
    };

    Ok(with_metadata(
        METHODOLOGY,
        &assumptions(),
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

/// Compute a single scenario wrapped in the standard envelope.
pub fn analyze_scenario(
    scenario: &Scenario,
) -> LoanScenarioResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();

    let result = compute_scenario(scenario);
    let warnings = fallback_warnings(std::slice::from_ref(&result));

    Ok(with_metadata(
        METHODOLOGY,
        &assumptions(),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn validate_unique_ids(scenarios: &[Scenario]) -> LoanScenarioResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(scenarios.len());
    for s in scenarios {
        if !seen.insert(s.id.as_str()) {
            return Err(LoanScenarioError::InvalidInput {
                field: "scenarios".into(),
                reason: format!("Duplicate scenario id '{}'", s.id),
            });
        }
    }
    Ok(())
}

fn fallback_warnings(results: &[ScenarioResult]) -> Vec<String> {
    let mut warnings = Vec::new();
    for r in results {
        for d in &r.loan_details {
            if d.effective_rate_is_fallback {
                warnings.push(format!(
                    "Effective rate for loan '{}' in scenario '{}' did not converge; \
                     the nominal rate is shown instead",
                    d.loan.name, r.scenario_name
                ));
            }
        }
    }
    warnings
}
