use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::effective_rate::{effective_annual_rate, RateSolution};
use crate::types::{Loan, Money, Percent};

/// Derived figures for a single loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub loan: Loan,
    pub monthly_payment: Money,
    /// Monthly payment times the number of installments
    pub total_payment: Money,
    /// Total payment minus principal
    pub total_interest: Money,
    /// Cash actually advanced: principal scaled by the issue price
    pub amount_received: Money,
    /// Principal minus amount received. Positive is a loss (issued
    /// below par), negative a gain (premium issuance).
    pub kurstab: Money,
    /// Annual effective rate in percent
    pub effective_interest_rate: Percent,
    /// True when the IRR solve was not computable and the nominal rate
    /// is shown in its place. Callers must not present such a value as
    /// an effective rate without qualification.
    pub effective_rate_is_fallback: bool,
}

impl LoanDetails {
    fn zero_contribution(loan: &Loan) -> LoanDetails {
        LoanDetails {
            loan: loan.clone(),
            monthly_payment: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            amount_received: Decimal::ZERO,
            kurstab: Decimal::ZERO,
            effective_interest_rate: Decimal::ZERO,
            effective_rate_is_fallback: false,
        }
    }
}

/// Compute the full detail record for one loan.
///
/// A loan that fails the well-formedness check contributes zero to every
/// derived figure rather than producing an error or a partial record.
pub fn loan_details(loan: &Loan) -> LoanDetails {
    if !loan.is_wellformed() {
        return LoanDetails::zero_contribution(loan);
    }

    let payment = monthly_payment(loan.principal, loan.interest_rate, loan.term_in_years);
    let months = loan.term_in_years * dec!(12);
    let total_payment = payment * months;
    let total_interest = total_payment - loan.principal;

    let kurs = loan.issue_price();
    let amount_received = loan.principal * kurs / Decimal::ONE_HUNDRED;
    let kurstab = loan.principal - amount_received;

    // At par the effective rate is the nominal rate, exactly. Off par
    // the IRR solver is authoritative, with the nominal rate as an
    // explicitly flagged fallback.
    let (effective_interest_rate, effective_rate_is_fallback) = if kurs == Decimal::ONE_HUNDRED {
        (loan.interest_rate, false)
    } else {
        match effective_annual_rate(loan.principal, kurs, payment, loan.term_in_years) {
            RateSolution::Converged(rate) => (rate, false),
            RateSolution::NotComputable => (loan.interest_rate, true),
        }
    };

    LoanDetails {
        loan: loan.clone(),
        monthly_payment: payment,
        total_payment,
        total_interest,
        amount_received,
        kurstab,
        effective_interest_rate,
        effective_rate_is_fallback,
    }
}
