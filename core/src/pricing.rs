//! The pricing engine — pure arithmetic over an input snapshot.
//!
//! RULES:
//!   - No state, no I/O, no reads of ambient configuration; the
//!     only configuration is the explicit `DeskConfig` argument.
//!   - Divide-by-zero paths are guarded and resolve to a defined
//!     fallback value, never an error.
//!   - Only the back-solved standard sale price is rounded (ceiling);
//!     every other output is a raw float the caller formats.

use crate::{
    config::DeskConfig,
    inputs::{ExpenseSet, MarketInput, ProductInput},
    scenario::{Scenario, ScenarioResult},
    types::Lira,
};

/// Withholding tax percentage applied when the configured rate is <= 0.
pub const DEFAULT_TAX_RATE: f64 = 1.00;

/// Fixed baseline margin the optimum score normalizes against.
/// A constant by design — it is not derived from the scenario's own
/// target margin.
pub const REFERENCE_MARGIN: f64 = 30.0;

/// Product amount in lira: weight x labor x FX rate.
pub fn product_amount(weight_grams: f64, labor_cost_usd: f64, usd_to_lira: f64) -> Lira {
    weight_grams * labor_cost_usd * usd_to_lira
}

/// Purchase price equals the product amount under the current
/// business rule. Kept as a named operation so a future change to the
/// rule never touches the call sites.
pub fn purchase_price(product_amount: Lira) -> Lira {
    product_amount
}

fn effective_tax_rate(expenses: &ExpenseSet) -> f64 {
    if expenses.e_commerce_tax_rate > 0.0 {
        expenses.e_commerce_tax_rate
    } else {
        DEFAULT_TAX_RATE
    }
}

fn fixed_expenses(expenses: &ExpenseSet, config: &DeskConfig) -> Lira {
    expenses.shipping
        + expenses.packaging
        + expenses.service_fee
        + expenses.extra_chain
        + expenses.special_packaging * config.light_box_multiplier
        + expenses.silver_chain_45
}

/// Back-solve the sale price S such that, after commission, the
/// withholding tax, and the target margin are taken as percentages of
/// S, the remainder covers purchase price plus fixed expenses.
///
/// When those percentage claims reach 100% of the sale price the
/// equation has no finite positive solution; the engine falls back to
/// 2x the product amount instead of failing. The fallback triggers at
/// `denom <= 0`, not `< 0`, and is not ceiled; the solved price is
/// always rounded up to the next whole lira.
pub fn standard_sale_price(
    product: &ProductInput,
    market: &MarketInput,
    expenses: &ExpenseSet,
    commission_rate: f64,
    target_margin: f64,
    config: &DeskConfig,
) -> Lira {
    let amount = product_amount(product.weight_grams, product.labor_cost_usd, market.usd_to_lira);
    let purchase = purchase_price(amount);

    let tax_rate = effective_tax_rate(expenses);
    let denom = 1.0 - tax_rate / 100.0 - commission_rate / 100.0 - target_margin / 100.0;

    if denom <= 0.0 {
        return amount * 2.0;
    }

    ((purchase + fixed_expenses(expenses, config)) / denom).ceil()
}

/// One scenario's full profit decomposition, computed over a single
/// snapshot of the inputs (no re-reads mid-computation).
pub fn scenario_result(
    product: &ProductInput,
    market: &MarketInput,
    expenses: &ExpenseSet,
    scenario: &Scenario,
    config: &DeskConfig,
) -> ScenarioResult {
    let amount = product_amount(product.weight_grams, product.labor_cost_usd, market.usd_to_lira);
    let purchase = purchase_price(amount);

    let commission_amount = scenario.sale_price * scenario.commission_rate / 100.0;
    let tax_amount = scenario.sale_price * effective_tax_rate(expenses) / 100.0;

    let total_expenses = expenses.shipping
        + expenses.packaging
        + tax_amount
        + expenses.service_fee
        + expenses.extra_chain
        + expenses.special_packaging * config.light_box_multiplier
        + expenses.silver_chain_45;

    let total_cost = purchase + total_expenses + commission_amount;
    let net_profit = scenario.sale_price - total_cost;
    let profit_margin = if scenario.sale_price > 0.0 {
        net_profit / scenario.sale_price * 100.0
    } else {
        0.0
    };

    // Cash landing in the bank: sale price minus what the platform,
    // the carrier, and the tax office take off the top.
    let net_deposit =
        scenario.sale_price - (commission_amount + expenses.shipping + tax_amount);

    // Normalize against what this same commission rate would have to
    // charge to hit the reference margin. A scenario scores 100 when
    // it prices at the reference price and hits the reference margin;
    // above 100 means over-pricing at equal or better margin.
    let reference_price = standard_sale_price(
        product,
        market,
        expenses,
        scenario.commission_rate,
        REFERENCE_MARGIN,
        config,
    );
    let coefficient = if reference_price > 0.0 && scenario.sale_price > 0.0 {
        scenario.sale_price / reference_price
    } else {
        1.0
    };
    let optimum_score = if reference_price > 0.0 {
        profit_margin / REFERENCE_MARGIN * coefficient * 100.0
    } else {
        0.0
    };

    ScenarioResult {
        scenario_name: scenario.name.clone(),
        commission_rate: scenario.commission_rate,
        sale_price: scenario.sale_price,
        commission_amount,
        total_expenses,
        net_profit,
        profit_margin,
        net_deposit,
        optimum_score,
        purchase_price: purchase,
    }
}
