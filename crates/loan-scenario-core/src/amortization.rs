//! Annuity payment calculation under the Danish market convention:
//! the stated nominal rate compounds quarterly while payments fall monthly.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate, Years};

/// Quarterly compounding is a domain constant. Loan offers carry an
/// `interest_frequency` field but the market convention being modelled
/// always compounds quarterly regardless of its value.
const COMPOUNDING_PER_YEAR: Decimal = dec!(4);
const PAYMENTS_PER_YEAR: Decimal = dec!(12);

/// Effective monthly rate equivalent to a quarterly-compounded nominal
/// annual rate given in percent: `(1 + rate/100/4)^(4/12) - 1`.
pub fn monthly_rate(annual_rate: Percent) -> Rate {
    if annual_rate.is_zero() {
        return Decimal::ZERO;
    }
    let quarterly = annual_rate / Decimal::ONE_HUNDRED / COMPOUNDING_PER_YEAR;
    (Decimal::ONE + quarterly).powd(COMPOUNDING_PER_YEAR / PAYMENTS_PER_YEAR) - Decimal::ONE
}

/// Fixed monthly payment that fully amortizes `principal` over
/// `term_years` at the given nominal annual rate.
///
/// Degenerate inputs (non-positive principal or term, negative rate)
/// describe "no loan" and return zero rather than erroring.
pub fn monthly_payment(principal: Money, annual_rate: Percent, term_years: Years) -> Money {
    if principal <= Decimal::ZERO || annual_rate < Decimal::ZERO || term_years <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let n = term_years * PAYMENTS_PER_YEAR;
    let r = monthly_rate(annual_rate);

    // Straight-line when the periodic rate vanishes; the annuity
    // formula would divide by zero.
    if r.is_zero() {
        return principal / n;
    }

    let growth = (Decimal::ONE + r).powd(n);
    principal * r * growth / (growth - Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        assert_eq!(monthly_payment(dec!(0), dec!(3.5), dec!(20)), dec!(0));
        assert_eq!(monthly_payment(dec!(-100000), dec!(3.5), dec!(20)), dec!(0));
        assert_eq!(monthly_payment(dec!(100000), dec!(-0.1), dec!(20)), dec!(0));
        assert_eq!(monthly_payment(dec!(100000), dec!(3.5), dec!(0)), dec!(0));
        assert_eq!(monthly_payment(dec!(100000), dec!(3.5), dec!(-1)), dec!(0));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        // 120,000 over 10 years at 0% => exactly 1,000/month
        assert_eq!(monthly_payment(dec!(120000), dec!(0), dec!(10)), dec!(1000));
    }

    #[test]
    fn test_known_payment_quarterly_convention() {
        // 600,000 at 3.36% nominal over 20 years. The quarterly
        // convention gives r = 1.0084^(1/3) - 1, and a payment of
        // roughly 3,433.90/month.
        let payment = monthly_payment(dec!(600000), dec!(3.36), dec!(20));
        assert!(
            (payment - dec!(3433.9)).abs() < dec!(1),
            "expected ~3433.90, got {payment}"
        );
    }

    #[test]
    fn test_monthly_rate_matches_quarterly_equivalent() {
        // Compounding a month's growth three times must recover the
        // quarterly rate: (1 + r)^3 == 1 + 3.36/100/4.
        let r = monthly_rate(dec!(3.36));
        let quarterly = (Decimal::ONE + r).powd(dec!(3)) - Decimal::ONE;
        assert!(
            (quarterly - dec!(0.0084)).abs() < dec!(0.0000001),
            "expected quarterly ~0.0084, got {quarterly}"
        );
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let low = monthly_payment(dec!(1000000), dec!(1.5), dec!(30));
        let high = monthly_payment(dec!(1000000), dec!(4.5), dec!(30));
        assert!(high > low);
    }
}
