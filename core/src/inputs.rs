//! Caller-owned input records: product, market, and expenses.
//!
//! The engine only ever reads these; keeping the values >= 0 is the
//! caller's responsibility, and negative inputs propagate through the
//! arithmetic unvalidated.

use crate::types::Lira;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductInput {
    pub weight_grams:   f64,
    pub labor_cost_usd: f64,
}

impl ProductInput {
    /// Display-only figure: labor cost scaled by weight, in USD.
    /// Recomputed on every read, never stored.
    pub fn dollar_amount(&self) -> f64 {
        self.weight_grams * self.labor_cost_usd
    }
}

impl Default for ProductInput {
    fn default() -> Self {
        Self {
            weight_grams:   2.20,
            labor_cost_usd: 1.50,
        }
    }
}

/// Single source of truth for currency conversion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketInput {
    pub usd_to_lira: f64,
}

impl Default for MarketInput {
    fn default() -> Self {
        Self { usd_to_lira: 42.00 }
    }
}

/// Per-unit fixed costs added to every scenario's total cost.
///
/// `premium_box` is carried in the record but participates in no
/// formula; `e_commerce_tax_rate` is a percentage and falls back to
/// 1.0 at every use site when it is <= 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExpenseSet {
    pub shipping:            Lira,
    pub packaging:           Lira,
    pub service_fee:         Lira,
    pub extra_chain:         Lira,
    pub special_packaging:   Lira,
    pub premium_box:         Lira,
    pub silver_chain_45:     Lira,
    pub e_commerce_tax_rate: f64,
}

impl Default for ExpenseSet {
    fn default() -> Self {
        Self {
            shipping:            120.0,
            packaging:           20.0,
            service_fee:         12.0,
            extra_chain:         5.0,
            special_packaging:   0.0,
            premium_box:         0.0,
            silver_chain_45:     0.0,
            e_commerce_tax_rate: 1.00,
        }
    }
}
