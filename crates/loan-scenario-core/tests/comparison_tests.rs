use loan_scenario_core::comparison::{
    analyze_scenario, compare_scenarios, compute_all, compute_scenario, loan_details, pick_best,
    with_savings, ComparisonInput, ScenarioResult,
};
use loan_scenario_core::types::{Loan, LoanType, Scenario};
use loan_scenario_core::LoanScenarioError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(id: &str, principal: Decimal, rate: Decimal, term: Decimal, kurs: Decimal) -> Loan {
    Loan {
        id: id.into(),
        name: format!("Loan {id}"),
        principal,
        interest_rate: rate,
        term_in_years: term,
        kurs,
        interest_frequency: 4,
        loan_type: LoanType::Fixed,
    }
}

fn scenario(id: &str, name: &str, loans: Vec<Loan>) -> Scenario {
    Scenario {
        id: id.into(),
        name: name.into(),
        loans,
    }
}

fn result_with_cost(id: &str, total_cost: Decimal) -> ScenarioResult {
    ScenarioResult {
        scenario_id: id.into(),
        scenario_name: format!("Scenario {id}"),
        total_principal: Decimal::ZERO,
        monthly_payment: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        total_kurstab: Decimal::ZERO,
        total_amount_received: Decimal::ZERO,
        total_cost,
        average_interest_rate: Decimal::ZERO,
        total_loan_term: Decimal::ZERO,
        kurstab_percentage: Decimal::ZERO,
        effective_interest_rate: Decimal::ZERO,
        loan_details: vec![],
    }
}

// ===========================================================================
// Per-loan details
// ===========================================================================

#[test]
fn test_par_loan_identity() {
    // At par: zero kurstab and the effective rate equals the nominal
    // rate exactly, not approximately.
    let d = loan_details(&loan("a", dec!(600000), dec!(3.36), dec!(20), dec!(100)));
    assert_eq!(d.kurstab, dec!(0));
    assert_eq!(d.amount_received, dec!(600000));
    assert_eq!(d.effective_interest_rate, dec!(3.36));
    assert!(!d.effective_rate_is_fallback);
}

#[test]
fn test_below_par_loan_example() {
    // Realkredit-style offer: 3,196,000 at 3.1% over 30 years, issued
    // at kurs 94.7331.
    let d = loan_details(&loan("a", dec!(3196000), dec!(3.1), dec!(30), dec!(94.7331)));
    assert_eq!(d.amount_received, dec!(3027669.876));
    assert_eq!(d.kurstab, dec!(168330.124));
    assert!(
        d.effective_interest_rate > dec!(3.1),
        "discounted issuance must raise the true cost, got {}",
        d.effective_interest_rate
    );
    assert!(!d.effective_rate_is_fallback);
}

#[test]
fn test_premium_issuance_is_a_gain() {
    let d = loan_details(&loan("a", dec!(1000000), dec!(4), dec!(10), dec!(105)));
    assert_eq!(d.kurstab, dec!(-50000));
    assert_eq!(d.amount_received, dec!(1050000));
    // Receiving more than par while repaying the same annuity must
    // lower the effective rate below the par effective rate.
    assert!(d.effective_interest_rate < dec!(4));
}

#[test]
fn test_degenerate_loan_contributes_zero() {
    let d = loan_details(&loan("a", dec!(500000), dec!(-1), dec!(20), dec!(95)));
    assert_eq!(d.monthly_payment, dec!(0));
    assert_eq!(d.total_payment, dec!(0));
    assert_eq!(d.total_interest, dec!(0));
    assert_eq!(d.kurstab, dec!(0));
    assert_eq!(d.amount_received, dec!(0));
    assert_eq!(d.effective_interest_rate, dec!(0));
}

#[test]
fn test_kurs_zero_resolves_to_par() {
    let d = loan_details(&loan("a", dec!(250000), dec!(2.5), dec!(10), dec!(0)));
    assert_eq!(d.kurstab, dec!(0));
    assert_eq!(d.amount_received, dec!(250000));
    assert_eq!(d.effective_interest_rate, dec!(2.5));
}

// ===========================================================================
// Scenario aggregation
// ===========================================================================

#[test]
fn test_empty_scenario_yields_zeros() {
    let r = compute_scenario(&scenario("s1", "Empty", vec![]));
    assert_eq!(r.total_principal, dec!(0));
    assert_eq!(r.monthly_payment, dec!(0));
    assert_eq!(r.total_interest, dec!(0));
    assert_eq!(r.total_kurstab, dec!(0));
    assert_eq!(r.total_cost, dec!(0));
    assert_eq!(r.average_interest_rate, dec!(0));
    assert_eq!(r.total_loan_term, dec!(0));
    assert_eq!(r.kurstab_percentage, dec!(0));
    assert_eq!(r.effective_interest_rate, dec!(0));
    assert!(r.loan_details.is_empty());
}

#[test]
fn test_additivity_across_loans() {
    let r = compute_scenario(&scenario(
        "s1",
        "Mixed",
        vec![
            loan("a", dec!(3196000), dec!(3.1), dec!(30), dec!(94.7331)),
            loan("b", dec!(600000), dec!(3.36), dec!(20), dec!(100)),
            loan("c", dec!(150000), dec!(6.5), dec!(10), dec!(100)),
        ],
    ));

    assert_eq!(r.total_principal, dec!(3946000));

    let detail_kurstab: Decimal = r.loan_details.iter().map(|d| d.kurstab).sum();
    let detail_interest: Decimal = r.loan_details.iter().map(|d| d.total_interest).sum();
    let detail_payment: Decimal = r.loan_details.iter().map(|d| d.monthly_payment).sum();
    assert_eq!(r.total_kurstab, detail_kurstab);
    assert_eq!(r.total_interest, detail_interest);
    assert_eq!(r.monthly_payment, detail_payment);

    assert_eq!(
        r.total_cost,
        r.total_principal + r.total_interest + r.total_kurstab
    );
}

#[test]
fn test_weighted_averages() {
    let r = compute_scenario(&scenario(
        "s1",
        "Two loans",
        vec![
            loan("a", dec!(1000000), dec!(2), dec!(10), dec!(100)),
            loan("b", dec!(3000000), dec!(4), dec!(30), dec!(100)),
        ],
    ));
    // (2*1m + 4*3m) / 4m and (10*1m + 30*3m) / 4m
    assert_eq!(r.average_interest_rate, dec!(3.5));
    assert_eq!(r.total_loan_term, dec!(25));
    // At par the amount-received weights equal the principal weights,
    // so the effective aggregate matches the nominal aggregate.
    assert_eq!(r.effective_interest_rate, dec!(3.5));
}

#[test]
fn test_weighted_average_stays_within_bounds() {
    let r = compute_scenario(&scenario(
        "s1",
        "Spread",
        vec![
            loan("a", dec!(700000), dec!(1.25), dec!(30), dec!(97.4)),
            loan("b", dec!(250000), dec!(4.75), dec!(20), dec!(100)),
            loan("c", dec!(90000), dec!(7.9), dec!(5), dec!(100)),
        ],
    ));
    assert!(r.average_interest_rate >= dec!(1.25));
    assert!(r.average_interest_rate <= dec!(7.9));
}

#[test]
fn test_degenerate_loan_excluded_from_aggregates() {
    let valid = compute_scenario(&scenario(
        "s1",
        "Valid only",
        vec![loan("a", dec!(600000), dec!(3.36), dec!(20), dec!(100))],
    ));
    let mixed = compute_scenario(&scenario(
        "s2",
        "With junk",
        vec![
            loan("a", dec!(600000), dec!(3.36), dec!(20), dec!(100)),
            loan("junk", dec!(500000), dec!(-2), dec!(20), dec!(95)),
        ],
    ));

    assert_eq!(mixed.total_principal, valid.total_principal);
    assert_eq!(mixed.monthly_payment, valid.monthly_payment);
    assert_eq!(mixed.total_cost, valid.total_cost);
    assert_eq!(mixed.average_interest_rate, valid.average_interest_rate);
    assert_eq!(mixed.loan_details.len(), 2);
}

#[test]
fn test_kurstab_percentage() {
    let r = compute_scenario(&scenario(
        "s1",
        "Below par",
        vec![loan("a", dec!(1000000), dec!(3), dec!(30), dec!(95))],
    ));
    assert_eq!(r.total_kurstab, dec!(50000));
    assert_eq!(r.kurstab_percentage, dec!(5));
}

#[test]
fn test_compute_all_preserves_order_and_isolation() {
    let results = compute_all(&[
        scenario("s1", "First", vec![loan("a", dec!(100000), dec!(3), dec!(10), dec!(100))]),
        scenario("s2", "Broken", vec![loan("b", dec!(-5), dec!(3), dec!(10), dec!(100))]),
        scenario("s3", "Third", vec![loan("c", dec!(200000), dec!(4), dec!(20), dec!(100))]),
    ]);
    let ids: Vec<&str> = results.iter().map(|r| r.scenario_id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);
    assert_eq!(results[1].total_cost, dec!(0));
    assert!(results[0].total_cost > dec!(0));
    assert!(results[2].total_cost > dec!(0));
}

// ===========================================================================
// Ranking
// ===========================================================================

#[test]
fn test_pick_best_is_stable_on_ties() {
    let results = vec![
        result_with_cost("s1", dec!(5000000)),
        result_with_cost("s2", dec!(4800000)),
        result_with_cost("s3", dec!(4800000)),
    ];
    let best = pick_best(&results).unwrap();
    assert_eq!(best.scenario_id, "s2");
}

#[test]
fn test_pick_best_of_empty_is_none() {
    assert!(pick_best(&[]).is_none());
}

#[test]
fn test_savings_require_two_scenarios() {
    let one = vec![result_with_cost("s1", dec!(5000000))];
    assert!(with_savings(&one).is_empty());
    assert!(with_savings(&[]).is_empty());
}

#[test]
fn test_savings_against_most_expensive() {
    let results = vec![
        result_with_cost("s1", dec!(5000000)),
        result_with_cost("s2", dec!(4800000)),
        result_with_cost("s3", dec!(4800000)),
    ];
    let ranked = with_savings(&results);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].savings_vs_most_expensive, dec!(0));
    assert_eq!(ranked[0].savings_percentage, dec!(0));
    assert_eq!(ranked[1].savings_vs_most_expensive, dec!(200000));
    assert_eq!(ranked[1].savings_percentage, dec!(4));
    assert_eq!(ranked[2].savings_vs_most_expensive, dec!(200000));
}

// ===========================================================================
// Envelope operations
// ===========================================================================

#[test]
fn test_compare_scenarios_ranks_and_labels_best() {
    let input = ComparisonInput {
        scenarios: vec![
            scenario(
                "bank",
                "Bank offer",
                vec![loan("a", dec!(3196000), dec!(3.6), dec!(30), dec!(100))],
            ),
            scenario(
                "realkredit",
                "Realkredit offer",
                vec![loan("b", dec!(3196000), dec!(3.1), dec!(30), dec!(94.7331))],
            ),
        ],
    };
    let output = compare_scenarios(&input).unwrap();

    assert_eq!(output.result.results.len(), 2);
    assert_eq!(output.result.savings.len(), 2);
    assert!(output.warnings.is_empty());

    let best_id = output.result.best_scenario_id.as_deref().unwrap();
    let best = pick_best(&output.result.results).unwrap();
    assert_eq!(best_id, best.scenario_id);
}

#[test]
fn test_compare_scenarios_rejects_empty_input() {
    let err = compare_scenarios(&ComparisonInput { scenarios: vec![] }).unwrap_err();
    assert!(matches!(err, LoanScenarioError::InsufficientData(_)));
}

#[test]
fn test_compare_scenarios_rejects_duplicate_ids() {
    let input = ComparisonInput {
        scenarios: vec![
            scenario("s1", "First", vec![]),
            scenario("s1", "Second", vec![]),
        ],
    };
    let err = compare_scenarios(&input).unwrap_err();
    assert!(matches!(err, LoanScenarioError::InvalidInput { .. }));
}

#[test]
fn test_compare_single_scenario_has_no_savings() {
    let input = ComparisonInput {
        scenarios: vec![scenario(
            "only",
            "Only offer",
            vec![loan("a", dec!(100000), dec!(3), dec!(10), dec!(100))],
        )],
    };
    let output = compare_scenarios(&input).unwrap();
    assert!(output.result.savings.is_empty());
    assert_eq!(output.result.best_scenario_id.as_deref(), Some("only"));
}

#[test]
fn test_fallback_rate_is_flagged_and_warned() {
    // A 0% loan issued at kurs 150 repays less than it advances, so the
    // IRR has no positive root: the nominal rate must be shown with the
    // fallback flag set and a warning naming loan and scenario.
    let s = scenario(
        "s1",
        "Premium offer",
        vec![loan("a", dec!(100000), dec!(0), dec!(10), dec!(150))],
    );
    let output = analyze_scenario(&s).unwrap();

    let d = &output.result.loan_details[0];
    assert!(d.effective_rate_is_fallback);
    assert_eq!(d.effective_interest_rate, dec!(0));
    assert_eq!(d.kurstab, dec!(-50000));

    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("Loan a"));
    assert!(output.warnings[0].contains("Premium offer"));
    assert!(output.warnings[0].contains("nominal"));
}

#[test]
fn test_compare_scenarios_carries_fallback_warnings() {
    let input = ComparisonInput {
        scenarios: vec![
            scenario(
                "sane",
                "Par offer",
                vec![loan("a", dec!(100000), dec!(3), dec!(10), dec!(100))],
            ),
            scenario(
                "odd",
                "Deep premium",
                vec![loan("b", dec!(100000), dec!(0), dec!(10), dec!(150))],
            ),
        ],
    };
    let output = compare_scenarios(&input).unwrap();
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("Deep premium"));
}

#[test]
fn test_analyze_scenario_envelope() {
    let s = scenario(
        "s1",
        "Offer",
        vec![loan("a", dec!(600000), dec!(3.36), dec!(20), dec!(100))],
    );
    let output = analyze_scenario(&s).unwrap();
    assert_eq!(output.result.scenario_id, "s1");
    assert_eq!(output.result.total_principal, dec!(600000));
    assert!(!output.methodology.is_empty());
    assert!(output.warnings.is_empty());
}

// ===========================================================================
// Wire format
// ===========================================================================

#[test]
fn test_loan_deserializes_from_ui_json() {
    let json = r#"{
        "id": "1",
        "name": "Realkredit",
        "principal": 3196000,
        "interestRate": 3.1,
        "termInYears": 30,
        "kurs": 94.7331,
        "interestFrequency": 4,
        "type": "fixed"
    }"#;
    let l: Loan = serde_json::from_str(json).unwrap();
    assert_eq!(l.principal, dec!(3196000));
    assert_eq!(l.interest_rate, dec!(3.1));
    assert_eq!(l.loan_type, LoanType::Fixed);
}

#[test]
fn test_kurs_defaults_to_par_when_absent() {
    let json = r#"{
        "id": "1",
        "name": "Banklån",
        "principal": 250000,
        "interestRate": 5.5,
        "termInYears": 10
    }"#;
    let l: Loan = serde_json::from_str(json).unwrap();
    assert_eq!(l.kurs, dec!(100));
    assert_eq!(l.interest_frequency, 4);
    assert_eq!(l.loan_type, LoanType::Fixed);
}
