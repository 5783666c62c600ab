use crate::types::ScenarioName;
use serde::{Deserialize, Serialize};

/// All edit events the presentation layer can submit to a session.
/// Variants added as the form grows — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum EditCommand {
    // ── Product & market inputs ───────────────────
    SetWeight { grams: f64 },
    SetLaborCost { usd: f64 },
    SetUsdRate { rate: f64 },

    // ── Expenses ──────────────────────────────────
    SetExpense { field: ExpenseField, value: f64 },
    SetChainLength { length: ChainLength },
    ToggleSpecialPackaging,

    // ── Scenario list ─────────────────────────────
    AddScenario,
    RemoveScenario { name: ScenarioName },
    RenameScenario { from: ScenarioName, to: ScenarioName },
    SetCommissionRate { name: ScenarioName, rate: f64 },
    SetTargetMargin { name: ScenarioName, margin: f64 },
    SetSalePrice { name: ScenarioName, price: f64 },

    // ── Settings ──────────────────────────────────
    ApplySettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseField {
    Shipping,
    Packaging,
    ServiceFee,
    ExtraChain,
    SpecialPackaging,
    PremiumBox,
    SilverChain45,
    ECommerceTaxRate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChainLength {
    None,
    Cm45,
    Cm60,
}
