use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_scenario_core::amortization;
use loan_scenario_core::effective_rate::{self, RateSolution};

/// Arguments for a single annuity payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,
    /// Nominal annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,
    /// Term in years
    #[arg(long)]
    pub term: Decimal,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = amortization::monthly_payment(args.principal, args.rate, args.term);
    Ok(json!({
        "monthlyPayment": payment,
        "totalPayment": payment * args.term * Decimal::from(12),
    }))
}

/// Arguments for an effective-rate calculation
#[derive(Args)]
pub struct EffectiveRateArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,
    /// Bond issue price as percent of par
    #[arg(long)]
    pub kurs: Decimal,
    /// Recurring monthly payment
    #[arg(long)]
    pub payment: Decimal,
    /// Term in years
    #[arg(long)]
    pub term: Decimal,
}

pub fn run_effective_rate(args: EffectiveRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match effective_rate::effective_annual_rate(args.principal, args.kurs, args.payment, args.term)
    {
        RateSolution::Converged(rate) => Ok(json!({ "effectiveInterestRate": rate })),
        RateSolution::NotComputable => {
            Err("effective rate is not computable for the given cash flows".into())
        }
    }
}
