//! Effective borrowing cost derived as an internal rate of return.
//!
//! A loan issued below par advances less cash than the principal being
//! repaid. The true cost is the rate that zeroes the net present value of
//! the actual cash flows: the kurs-adjusted advance out, the monthly
//! annuity payments back in.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate, Years};

const MAX_ITERATIONS: u32 = 100;
const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const INITIAL_GUESS: Decimal = dec!(0.01);
const DERIVATIVE_FLOOR: Decimal = dec!(0.000000000001);
const MIN_RATE: Decimal = dec!(-0.99);
const MAX_RATE: Decimal = dec!(100);

/// Outcome of the IRR solve. A two-variant result rather than a bare
/// number so that callers must handle the fallback path explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateSolution {
    /// Effective annual rate in percent
    Converged(Percent),
    /// The iteration did not converge, or converged to a rate that is
    /// not a physically meaningful borrowing cost.
    NotComputable,
}

impl RateSolution {
    pub fn rate(&self) -> Option<Percent> {
        match self {
            RateSolution::Converged(r) => Some(*r),
            RateSolution::NotComputable => None,
        }
    }
}

/// Effective annual rate of a loan from the cash actually advanced
/// (`principal * kurs/100`) against its recurring monthly payment.
pub fn effective_annual_rate(
    principal: Money,
    kurs: Percent,
    monthly_payment: Money,
    term_years: Years,
) -> RateSolution {
    if kurs <= Decimal::ZERO
        || principal <= Decimal::ZERO
        || monthly_payment <= Decimal::ZERO
        || term_years <= Decimal::ZERO
    {
        return RateSolution::NotComputable;
    }

    // Nearest whole installment, mirroring the amortization module's
    // `term * 12` payment count for fractional terms.
    let months = match (term_years * dec!(12)).round().to_u64() {
        Some(m) if m > 0 => m,
        _ => return RateSolution::NotComputable,
    };

    let advance = principal * kurs / Decimal::ONE_HUNDRED;

    let monthly = match solve_monthly_rate(advance, monthly_payment, months) {
        Some(g) => g,
        None => return RateSolution::NotComputable,
    };

    // A non-positive root means the model broke down, not that money
    // is free; refuse to report it.
    if monthly <= Decimal::ZERO {
        return RateSolution::NotComputable;
    }

    let annual = (Decimal::ONE + monthly).powd(dec!(12)) - Decimal::ONE;
    RateSolution::Converged(annual * Decimal::ONE_HUNDRED)
}

/// Newton-Raphson on the NPV of `[-advance, payment, payment, ...]`.
/// Converges when successive guesses differ by less than the threshold.
///
/// Iterates are clamped to keep `1 + rate` away from zero, and the
/// accumulation uses checked arithmetic: a deep-negative rate makes the
/// discount grow geometrically, and that must end the solve, not the
/// process.
fn solve_monthly_rate(advance: Money, payment: Money, months: u64) -> Option<Rate> {
    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let one_plus_r = Decimal::ONE + rate;
        if one_plus_r <= Decimal::ZERO {
            return None;
        }

        let mut npv = -advance;
        let mut dnpv = Decimal::ZERO;
        let mut discount = Decimal::ONE;

        for t in 1..=months {
            discount = discount.checked_div(one_plus_r)?;
            npv = npv.checked_add(payment.checked_mul(discount)?)?;
            let slope = Decimal::from(t)
                .checked_mul(payment)?
                .checked_mul(discount)?
                .checked_div(one_plus_r)?;
            dnpv = dnpv.checked_sub(slope)?;
        }

        if dnpv.abs() < DERIVATIVE_FLOOR {
            return None;
        }

        let step = npv.checked_div(dnpv)?;
        let next = rate.checked_sub(step)?;

        // Guard against divergence. A clamped iterate never counts as
        // converged; the loop either recovers or runs out of steps.
        if next < MIN_RATE {
            rate = MIN_RATE;
            continue;
        }
        if next > MAX_RATE {
            rate = MAX_RATE;
            continue;
        }

        if (next - rate).abs() < CONVERGENCE_THRESHOLD {
            return Some(next);
        }
        rate = next;
    }

    None
}
