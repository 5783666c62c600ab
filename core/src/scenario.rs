//! Scenario records, their classification, and the per-scenario
//! result produced by an evaluation pass.

use crate::types::{Lira, ScenarioName};
use serde::{Deserialize, Serialize};

/// Canonical name of the permanent default scenario.
pub const DEFAULT_SCENARIO_NAME: &str = "Standard";

/// Name prefix for auto-numbered scenarios ("Scenario 1", "Scenario 2", ...).
pub const NUMBERED_PREFIX: &str = "Scenario ";

/// How a scenario's sale price is managed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Sale price is recomputed from the target margin whenever the
    /// shared inputs (or the scenario's own rates) change.
    SystemPriced,
    /// Sale price is set directly by the user; the stored target
    /// margin, if any, is ignored for pricing.
    ManuallyPriced,
}

/// A named sales channel with its own commission rate and sale price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name:            ScenarioName,
    pub commission_rate: f64,
    pub sale_price:      Lira,
    #[serde(default)]
    pub target_margin:   Option<f64>,
    pub pricing:         PricingMode,
}

impl Scenario {
    pub fn classify(&self) -> ScenarioClass {
        ScenarioClass::of(&self.name)
    }
}

/// Tagged classification of a scenario name, resolved once per
/// scenario instead of string-matching at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioClass {
    /// The permanent default scenario.
    Default,
    /// An auto-numbered scenario ("Scenario N").
    Numbered(u32),
    /// Any other user-chosen name.
    Custom,
}

impl ScenarioClass {
    pub fn of(name: &str) -> Self {
        if name == DEFAULT_SCENARIO_NAME {
            return ScenarioClass::Default;
        }
        if let Some(rest) = name.strip_prefix(NUMBERED_PREFIX) {
            if let Ok(n) = rest.parse::<u32>() {
                return ScenarioClass::Numbered(n);
            }
        }
        ScenarioClass::Custom
    }
}

/// One scenario's full profit decomposition. Created fresh on every
/// evaluation pass and never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResult {
    pub scenario_name:     ScenarioName,
    pub commission_rate:   f64,
    pub sale_price:        Lira,
    pub commission_amount: Lira,
    pub total_expenses:    Lira,
    pub net_profit:        Lira,
    /// Net profit as a percentage of the sale price; 0 when the sale
    /// price is 0.
    pub profit_margin:     f64,
    /// Cash actually received after commission, shipping, and the
    /// withholding tax, before other fixed expenses ("bankaya yatan").
    pub net_deposit:       Lira,
    /// Normalized ranking metric; 100 means the scenario hits the
    /// reference margin at exactly the reference price.
    pub optimum_score:     f64,
    pub purchase_price:    Lira,
}
