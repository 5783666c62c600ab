//! Desk configuration: the settings blob, made explicit.
//!
//! One explicit value handed to the policy and the pricing engine,
//! never read from ambient state at the call sites. Older settings
//! files keep working because missing fields fall back to the shipped
//! defaults on deserialization.

use crate::{
    error::DeskResult,
    inputs::{ExpenseSet, MarketInput, ProductInput},
    scenario::{PricingMode, Scenario},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeskConfig {
    pub default_weight_grams:   f64,
    pub default_labor_cost_usd: f64,
    pub default_usd_rate:       f64,
    pub default_shipping:       f64,
    pub default_packaging:      f64,
    pub default_service_fee:    f64,
    pub default_tax_rate:       f64,
    /// Commission rate for new scenarios, and the fallback when a
    /// system-priced scenario's own rate is 0.
    pub default_commission_rate: f64,
    /// Target margin for the rebuilt default scenario, and the
    /// fallback when a system-priced scenario has no margin set.
    pub default_target_margin:  f64,
    /// Cost written into `special_packaging` when it is toggled on.
    pub special_packaging_cost: f64,
    pub chain_45_price:         f64,
    pub chain_60_price:         f64,
    /// Weight applied to `special_packaging` before it enters any
    /// expense total.
    pub light_box_multiplier:   f64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            default_weight_grams:    2.20,
            default_labor_cost_usd:  1.50,
            default_usd_rate:        42.00,
            default_shipping:        120.0,
            default_packaging:       20.0,
            default_service_fee:     12.0,
            default_tax_rate:        1.0,
            default_commission_rate: 22.0,
            default_target_margin:   30.0,
            special_packaging_cost:  150.0,
            chain_45_price:          10.0,
            chain_60_price:          30.0,
            light_box_multiplier:    2.0,
        }
    }
}

impl DeskConfig {
    /// Load settings from a JSON file.
    pub fn load(path: &str) -> DeskResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading settings file {path}: {e}"))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Push the configured defaults into live session state, the way
    /// the settings dialog's "apply now" did: inputs take the default
    /// values, system-priced scenarios take the default commission
    /// rate and target margin. Manually priced scenarios and the
    /// toggled-off special packaging are left alone.
    pub fn apply_to(
        &self,
        product: &mut ProductInput,
        market: &mut MarketInput,
        expenses: &mut ExpenseSet,
        scenarios: &mut [Scenario],
    ) {
        product.weight_grams = self.default_weight_grams;
        product.labor_cost_usd = self.default_labor_cost_usd;
        market.usd_to_lira = self.default_usd_rate;

        expenses.shipping = self.default_shipping;
        expenses.packaging = self.default_packaging;
        expenses.service_fee = self.default_service_fee;
        expenses.e_commerce_tax_rate = self.default_tax_rate;
        if expenses.special_packaging > 0.0 {
            expenses.special_packaging = self.special_packaging_cost;
        }

        for scenario in scenarios
            .iter_mut()
            .filter(|s| s.pricing == PricingMode::SystemPriced)
        {
            scenario.commission_rate = self.default_commission_rate;
            scenario.target_margin = Some(self.default_target_margin);
        }

        log::info!("config: applied settings defaults to session state");
    }
}
