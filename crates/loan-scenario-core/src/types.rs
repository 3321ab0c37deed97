use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed in percent (3.36 = 3.36%), matching the wire format
/// of the loan offers this engine compares.
pub type Percent = Decimal;

/// Per-period rates expressed as decimals (0.0028 = 0.28% per month).
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Fixed-rate vs. variable-rate tag. Reporting-only: no calculation
/// reads it, since variable-rate path simulation is out of scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    #[default]
    Fixed,
    Variable,
}

/// A single loan inside a scenario, as supplied by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    /// Display label (e.g. "Realkredit", "Banklån"); no semantic role.
    pub name: String,
    /// Nominal amount to be repaid
    pub principal: Money,
    /// Nominal annual rate in percent
    pub interest_rate: Percent,
    /// Repayment horizon in years
    pub term_in_years: Years,
    /// Bond issue price as percent of par. 100 = par, below 100 produces
    /// an immediate kurstab loss, above 100 an immediate gain.
    #[serde(default = "default_kurs")]
    pub kurs: Percent,
    /// Compounding periods per year as stated on the offer. Carried for
    /// reporting; the amortization formulas fix compounding at quarterly.
    #[serde(default = "default_interest_frequency")]
    pub interest_frequency: u32,
    #[serde(rename = "type", default)]
    pub loan_type: LoanType,
}

fn default_kurs() -> Percent {
    Decimal::ONE_HUNDRED
}

fn default_interest_frequency() -> u32 {
    4
}

impl Loan {
    /// Issue price with the par default applied. Absent, zero, and
    /// negative kurs all resolve to 100 here, once, so no formula has
    /// to re-derive the default.
    pub fn issue_price(&self) -> Percent {
        if self.kurs <= Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            self.kurs
        }
    }

    /// A loan contributes to a scenario only when its numbers describe
    /// an actual loan. Anything else counts as zero contribution rather
    /// than an error.
    pub fn is_wellformed(&self) -> bool {
        self.principal > Decimal::ZERO
            && self.interest_rate >= Decimal::ZERO
            && self.term_in_years > Decimal::ZERO
    }
}

/// A named set of loans to be costed as one borrowing alternative.
/// A scenario with zero loans is valid and yields all-zero aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    /// Display label (e.g. "Nordea offer", "Jyske Bank offer")
    pub name: String,
    #[serde(default)]
    pub loans: Vec<Loan>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
