use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::loan::{loan_details, LoanDetails};
use crate::types::{Money, Percent, Scenario, Years};

/// Aggregated figures for one scenario, recomputed wholesale from its
/// loans on every pass. Nothing here is ever mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub scenario_id: String,
    pub scenario_name: String,
    pub total_principal: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_kurstab: Money,
    pub total_amount_received: Money,
    /// Principal + interest + kurstab, by construction
    pub total_cost: Money,
    /// Principal-weighted mean of nominal rates, percent
    pub average_interest_rate: Percent,
    /// Principal-weighted mean of terms, years
    pub total_loan_term: Years,
    /// Kurstab as percent of total principal
    pub kurstab_percentage: Percent,
    /// Amount-received-weighted mean of per-loan effective rates
    pub effective_interest_rate: Percent,
    pub loan_details: Vec<LoanDetails>,
}

/// Compute the aggregate result for a single scenario.
pub fn compute_scenario(scenario: &Scenario) -> ScenarioResult {
    let details: Vec<LoanDetails> = scenario.loans.iter().map(loan_details).collect();

    let mut total_principal = Decimal::ZERO;
    let mut monthly_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_kurstab = Decimal::ZERO;
    let mut total_amount_received = Decimal::ZERO;
    let mut rate_weighted = Decimal::ZERO;
    let mut term_weighted = Decimal::ZERO;
    let mut effective_weighted = Decimal::ZERO;

    for d in &details {
        // Ill-formed loans were normalized to zero contribution; keep
        // their principal out of the weights as well.
        if !d.loan.is_wellformed() {
            continue;
        }
        total_principal += d.loan.principal;
        monthly_payment += d.monthly_payment;
        total_interest += d.total_interest;
        total_kurstab += d.kurstab;
        total_amount_received += d.amount_received;
        rate_weighted += d.loan.interest_rate * d.loan.principal;
        term_weighted += d.loan.term_in_years * d.loan.principal;
        effective_weighted += d.effective_interest_rate * d.amount_received;
    }

    let total_cost = total_principal + total_interest + total_kurstab;

    let (average_interest_rate, total_loan_term, kurstab_percentage) =
        if total_principal.is_zero() {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        } else {
            (
                rate_weighted / total_principal,
                term_weighted / total_principal,
                total_kurstab / total_principal * Decimal::ONE_HUNDRED,
            )
        };

    let effective_interest_rate = if total_amount_received.is_zero() {
        average_interest_rate
    } else {
        effective_weighted / total_amount_received
    };

    ScenarioResult {
        scenario_id: scenario.id.clone(),
        scenario_name: scenario.name.clone(),
        total_principal,
        monthly_payment,
        total_interest,
        total_kurstab,
        total_amount_received,
        total_cost,
        average_interest_rate,
        total_loan_term,
        kurstab_percentage,
        effective_interest_rate,
        loan_details: details,
    }
}

/// Order-preserving map over a scenario set. Each scenario is computed
/// independently; one scenario's degenerate inputs never affect another.
pub fn compute_all(scenarios: &[Scenario]) -> Vec<ScenarioResult> {
    scenarios.iter().map(compute_scenario).collect()
}
