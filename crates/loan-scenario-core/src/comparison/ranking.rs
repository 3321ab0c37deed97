use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scenario::ScenarioResult;
use crate::types::{Money, Percent};

/// A scenario result extended with its savings against the most
/// expensive scenario in the compared set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSavings {
    #[serde(flatten)]
    pub result: ScenarioResult,
    pub savings_vs_most_expensive: Money,
    pub savings_percentage: Percent,
}

/// The scenario with the lowest total cost. Ties break on encounter
/// order: the first minimum wins.
pub fn pick_best(results: &[ScenarioResult]) -> Option<&ScenarioResult> {
    results
        .iter()
        .reduce(|best, r| if r.total_cost < best.total_cost { r } else { best })
}

/// Savings of every scenario versus the most expensive one. A ranking
/// needs something to rank against, so fewer than two results yield an
/// empty list.
pub fn with_savings(results: &[ScenarioResult]) -> Vec<ScenarioSavings> {
    if results.len() < 2 {
        return Vec::new();
    }

    let mut most_expensive = results[0].total_cost;
    for r in &results[1..] {
        if r.total_cost > most_expensive {
            most_expensive = r.total_cost;
        }
    }

    results
        .iter()
        .map(|r| {
            let savings = most_expensive - r.total_cost;
            let savings_percentage = if most_expensive.is_zero() {
                Decimal::ZERO
            } else {
                savings / most_expensive * Decimal::ONE_HUNDRED
            };
            ScenarioSavings {
                result: r.clone(),
                savings_vs_most_expensive: savings,
                savings_percentage,
            }
        })
        .collect()
}
