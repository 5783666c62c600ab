//! Scenario list policy — the rules that keep the list well-formed.
//!
//! RULES:
//!   - The list is never empty; removing the last scenario rebuilds
//!     the default.
//!   - The default scenario's name is immutable; renames of it are
//!     no-ops.
//!   - Only system-priced scenarios are ever repriced automatically,
//!     and only when the fresh price moves by more than the tolerance.

use crate::{
    config::DeskConfig,
    error::{DeskError, DeskResult},
    inputs::{ExpenseSet, MarketInput, ProductInput},
    pricing,
    scenario::{
        PricingMode, Scenario, ScenarioClass, DEFAULT_SCENARIO_NAME, NUMBERED_PREFIX,
    },
    types::{Lira, ScenarioName},
};

/// Minimum sale-price delta before a system-priced refresh overwrites
/// the stored price. Avoids redundant update churn.
pub const PRICE_TOLERANCE: f64 = 0.01;

/// Build the canonical default scenario for the given product amount.
pub fn standard_scenario(product_amount: Lira, config: &DeskConfig) -> Scenario {
    Scenario {
        name:            DEFAULT_SCENARIO_NAME.to_string(),
        commission_rate: config.default_commission_rate,
        sale_price:      (product_amount * 2.0).round(),
        target_margin:   Some(config.default_target_margin),
        pricing:         PricingMode::SystemPriced,
    }
}

/// Append a manually priced scenario under the next free number
/// (max existing "Scenario N" plus one, starting at 1). The initial
/// sale price copies the default scenario's current price, or falls
/// back to round(product_amount x 2) when no default is present.
/// Returns the assigned name.
pub fn add_scenario(
    scenarios: &mut Vec<Scenario>,
    product_amount: Lira,
    config: &DeskConfig,
) -> ScenarioName {
    let next = scenarios
        .iter()
        .filter_map(|s| match s.classify() {
            ScenarioClass::Numbered(n) => Some(n),
            _ => None,
        })
        .max()
        .map_or(1, |n| n + 1);

    let initial_sale = scenarios
        .iter()
        .find(|s| s.classify() == ScenarioClass::Default)
        .map(|s| s.sale_price)
        .unwrap_or_else(|| product_amount * 2.0);

    let name = format!("{NUMBERED_PREFIX}{next}");
    scenarios.push(Scenario {
        name:            name.clone(),
        commission_rate: config.default_commission_rate,
        sale_price:      initial_sale.round(),
        target_margin:   None,
        pricing:         PricingMode::ManuallyPriced,
    });

    log::info!("policy: added scenario '{name}'");
    name
}

/// Remove a scenario by name. Removing the last scenario does not
/// leave the list empty — a freshly built default takes its place.
pub fn remove_scenario(
    scenarios: &mut Vec<Scenario>,
    name: &str,
    product_amount: Lira,
    config: &DeskConfig,
) -> DeskResult<()> {
    let idx = scenarios
        .iter()
        .position(|s| s.name == name)
        .ok_or_else(|| DeskError::UnknownScenario { name: name.to_string() })?;
    scenarios.remove(idx);
    log::info!("policy: removed scenario '{name}'");

    if scenarios.is_empty() {
        log::info!("policy: list emptied, rebuilding the default scenario");
        scenarios.push(standard_scenario(product_amount, config));
    }
    Ok(())
}

/// Rename a scenario. The default scenario's name is immutable, so a
/// rename aimed at it is a logged no-op. Uniqueness of the new name
/// is not enforced; duplicates survive until the caller resolves them.
pub fn rename_scenario(scenarios: &mut [Scenario], from: &str, to: &str) -> DeskResult<()> {
    let scenario = scenarios
        .iter_mut()
        .find(|s| s.name == from)
        .ok_or_else(|| DeskError::UnknownScenario { name: from.to_string() })?;

    if scenario.classify() == ScenarioClass::Default {
        log::debug!("policy: rename of the default scenario ignored");
        return Ok(());
    }

    log::info!("policy: renamed '{from}' -> '{to}'");
    scenario.name = to.to_string();
    Ok(())
}

/// Recompute every system-priced scenario's sale price from the
/// current inputs: commission falls back to the configured default
/// when 0, the target margin to the configured default when unset.
///
/// Returns how many prices actually moved. Recompute depends only on
/// the current inputs, never on the previous price, so a second pass
/// over unchanged inputs must return 0.
pub fn refresh_system_priced(
    scenarios: &mut [Scenario],
    product: &ProductInput,
    market: &MarketInput,
    expenses: &ExpenseSet,
    config: &DeskConfig,
) -> usize {
    let mut touched = 0;

    for scenario in scenarios
        .iter_mut()
        .filter(|s| s.pricing == PricingMode::SystemPriced)
    {
        let commission = if scenario.commission_rate != 0.0 {
            scenario.commission_rate
        } else {
            config.default_commission_rate
        };
        let target = scenario.target_margin.unwrap_or(config.default_target_margin);

        let fresh =
            pricing::standard_sale_price(product, market, expenses, commission, target, config);
        if (scenario.sale_price - fresh).abs() > PRICE_TOLERANCE {
            log::debug!(
                "policy: repriced '{}' {:.2} -> {:.2}",
                scenario.name,
                scenario.sale_price,
                fresh
            );
            scenario.sale_price = fresh;
            touched += 1;
        }
    }

    touched
}
