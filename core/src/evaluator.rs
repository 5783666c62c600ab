//! Scenario evaluator: canonical ordering plus one result per scenario.

use crate::{
    config::DeskConfig,
    inputs::{ExpenseSet, MarketInput, ProductInput},
    pricing,
    scenario::{Scenario, ScenarioClass, ScenarioResult},
};
use std::cmp::Ordering;

/// Evaluate every scenario against the same input snapshot.
///
/// Ordering: the default scenario first, numbered scenarios ascending
/// by their number, custom names lexicographically after all numbered
/// ones; the sort is stable. The output always has one entry per
/// input scenario — duplicates pass through, uniqueness is the list
/// policy's concern, not this step's.
pub fn evaluate_all(
    product: &ProductInput,
    market: &MarketInput,
    expenses: &ExpenseSet,
    scenarios: &[Scenario],
    config: &DeskConfig,
) -> Vec<ScenarioResult> {
    let mut ordered: Vec<&Scenario> = scenarios.iter().collect();
    ordered.sort_by(|a, b| compare(a, b));

    ordered
        .into_iter()
        .map(|s| pricing::scenario_result(product, market, expenses, s, config))
        .collect()
}

fn compare(a: &Scenario, b: &Scenario) -> Ordering {
    use ScenarioClass::*;

    match (a.classify(), b.classify()) {
        (Default, Default) => Ordering::Equal,
        (Default, _) => Ordering::Less,
        (_, Default) => Ordering::Greater,
        (Numbered(x), Numbered(y)) => x.cmp(&y),
        (Numbered(_), Custom) => Ordering::Less,
        (Custom, Numbered(_)) => Ordering::Greater,
        (Custom, Custom) => a.name.cmp(&b.name),
    }
}
