use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| napi::Error::from_reason(format!("invalid decimal for {field}: {e}")))
}

/// Compare a scenario set and rank it by total cost. Takes and returns
/// JSON strings so the UI keeps full decimal precision on the wire.
#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: loan_scenario_core::comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_scenario_core::comparison::compare_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Full breakdown for a single scenario.
#[napi]
pub fn compute_scenario(input_json: String) -> NapiResult<String> {
    let scenario: loan_scenario_core::types::Scenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_scenario_core::comparison::analyze_scenario(&scenario).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Monthly annuity payment for a single loan, decimal strings in and out.
#[napi]
pub fn monthly_payment(
    principal: String,
    annual_rate: String,
    term_years: String,
) -> NapiResult<String> {
    let principal = parse_decimal("principal", &principal)?;
    let annual_rate = parse_decimal("annual_rate", &annual_rate)?;
    let term_years = parse_decimal("term_years", &term_years)?;
    let payment =
        loan_scenario_core::amortization::monthly_payment(principal, annual_rate, term_years);
    Ok(payment.to_string())
}
