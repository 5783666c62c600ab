//! A desk session — the single mutable state the caller owns.
//!
//! The session holds the input records and the scenario list, applies
//! edit commands, and runs the policy settle pass after every edit so
//! system-priced scenarios always reflect the current inputs. The
//! engine and the evaluator stay pure; everything mutable lives here.

use crate::{
    command::{ChainLength, EditCommand, ExpenseField},
    config::DeskConfig,
    error::{DeskError, DeskResult},
    evaluator,
    inputs::{ExpenseSet, MarketInput, ProductInput},
    policy, pricing,
    scenario::{PricingMode, Scenario, ScenarioClass, ScenarioResult},
    store::{keys, DeskStore},
    types::Lira,
};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq)]
pub struct DeskSession {
    pub config:    DeskConfig,
    pub product:   ProductInput,
    pub market:    MarketInput,
    pub expenses:  ExpenseSet,
    pub scenarios: Vec<Scenario>,
}

impl DeskSession {
    /// Fresh session: default inputs and a single settled default
    /// scenario.
    pub fn new(config: DeskConfig) -> Self {
        let product = ProductInput::default();
        let market = MarketInput::default();
        let expenses = ExpenseSet::default();
        let amount =
            pricing::product_amount(product.weight_grams, product.labor_cost_usd, market.usd_to_lira);

        let mut session = Self {
            scenarios: vec![policy::standard_scenario(amount, &config)],
            config,
            product,
            market,
            expenses,
        };
        session.settle();
        session
    }

    /// Restore a session from the store. Any missing or unreadable
    /// blob falls back to its defaults; a scenario list without the
    /// default scenario is replaced wholesale by a fresh default.
    pub fn load(store: &DeskStore) -> DeskResult<Self> {
        let config: DeskConfig = load_json_or(store, keys::SETTINGS, DeskConfig::default)?;
        let product: ProductInput = load_json_or(store, keys::PRODUCT_INPUT, ProductInput::default)?;
        let market: MarketInput = load_json_or(store, keys::MARKET_INPUT, MarketInput::default)?;
        let expenses: ExpenseSet = load_json_or(store, keys::EXPENSES, ExpenseSet::default)?;
        let mut scenarios: Vec<Scenario> = load_json_or(store, keys::SCENARIOS, Vec::new)?;

        if !scenarios.iter().any(|s| s.classify() == ScenarioClass::Default) {
            if !scenarios.is_empty() {
                log::warn!(
                    "session: stored scenario list has no default scenario, discarding {} entries",
                    scenarios.len()
                );
            }
            let amount = pricing::product_amount(
                product.weight_grams,
                product.labor_cost_usd,
                market.usd_to_lira,
            );
            scenarios = vec![policy::standard_scenario(amount, &config)];
        }

        let mut session = Self {
            config,
            product,
            market,
            expenses,
            scenarios,
        };
        session.settle();
        Ok(session)
    }

    /// Persist every session record.
    pub fn save(&self, store: &DeskStore) -> DeskResult<()> {
        store.save_blob(keys::SETTINGS, &serde_json::to_string(&self.config)?)?;
        store.save_blob(keys::PRODUCT_INPUT, &serde_json::to_string(&self.product)?)?;
        store.save_blob(keys::MARKET_INPUT, &serde_json::to_string(&self.market)?)?;
        store.save_blob(keys::EXPENSES, &serde_json::to_string(&self.expenses)?)?;
        store.save_blob(keys::SCENARIOS, &serde_json::to_string(&self.scenarios)?)?;
        Ok(())
    }

    /// Apply one edit command, then settle.
    pub fn apply(&mut self, command: EditCommand) -> DeskResult<()> {
        match command {
            EditCommand::SetWeight { grams } => self.product.weight_grams = grams,
            EditCommand::SetLaborCost { usd } => self.product.labor_cost_usd = usd,
            EditCommand::SetUsdRate { rate } => self.market.usd_to_lira = rate,

            EditCommand::SetExpense { field, value } => self.set_expense(field, value),
            EditCommand::SetChainLength { length } => {
                self.expenses.extra_chain = match length {
                    ChainLength::None => 0.0,
                    ChainLength::Cm45 => self.config.chain_45_price,
                    ChainLength::Cm60 => self.config.chain_60_price,
                };
            }
            EditCommand::ToggleSpecialPackaging => {
                self.expenses.special_packaging = if self.expenses.special_packaging == 0.0 {
                    self.config.special_packaging_cost
                } else {
                    0.0
                };
            }

            EditCommand::AddScenario => {
                let amount = self.product_amount();
                policy::add_scenario(&mut self.scenarios, amount, &self.config);
            }
            EditCommand::RemoveScenario { name } => {
                let amount = self.product_amount();
                policy::remove_scenario(&mut self.scenarios, &name, amount, &self.config)?;
            }
            EditCommand::RenameScenario { from, to } => {
                policy::rename_scenario(&mut self.scenarios, &from, &to)?;
            }
            EditCommand::SetCommissionRate { name, rate } => {
                self.scenario_mut(&name)?.commission_rate = rate;
            }
            EditCommand::SetTargetMargin { name, margin } => {
                self.scenario_mut(&name)?.target_margin = Some(margin);
            }
            EditCommand::SetSalePrice { name, price } => {
                let scenario = self.scenario_mut(&name)?;
                if scenario.pricing == PricingMode::SystemPriced {
                    log::debug!(
                        "session: sale price of system-priced '{name}' is managed automatically, edit ignored"
                    );
                } else {
                    scenario.sale_price = price;
                }
            }

            EditCommand::ApplySettings => {
                self.config.apply_to(
                    &mut self.product,
                    &mut self.market,
                    &mut self.expenses,
                    &mut self.scenarios,
                );
            }
        }

        self.settle();
        Ok(())
    }

    /// Idempotent settle pass: reprice the system-priced scenarios
    /// from the current inputs. Converges in a single pass because
    /// recompute never depends on the previous sale price. Returns
    /// how many prices moved.
    pub fn settle(&mut self) -> usize {
        policy::refresh_system_priced(
            &mut self.scenarios,
            &self.product,
            &self.market,
            &self.expenses,
            &self.config,
        )
    }

    pub fn product_amount(&self) -> Lira {
        pricing::product_amount(
            self.product.weight_grams,
            self.product.labor_cost_usd,
            self.market.usd_to_lira,
        )
    }

    pub fn purchase_price(&self) -> Lira {
        pricing::purchase_price(self.product_amount())
    }

    /// Evaluate every scenario against the current inputs.
    pub fn evaluate(&self) -> Vec<ScenarioResult> {
        evaluator::evaluate_all(
            &self.product,
            &self.market,
            &self.expenses,
            &self.scenarios,
            &self.config,
        )
    }

    fn set_expense(&mut self, field: ExpenseField, value: f64) {
        match field {
            ExpenseField::Shipping => self.expenses.shipping = value,
            ExpenseField::Packaging => self.expenses.packaging = value,
            ExpenseField::ServiceFee => self.expenses.service_fee = value,
            ExpenseField::ExtraChain => self.expenses.extra_chain = value,
            ExpenseField::SpecialPackaging => self.expenses.special_packaging = value,
            ExpenseField::PremiumBox => self.expenses.premium_box = value,
            ExpenseField::SilverChain45 => self.expenses.silver_chain_45 = value,
            ExpenseField::ECommerceTaxRate => self.expenses.e_commerce_tax_rate = value,
        }
    }

    fn scenario_mut(&mut self, name: &str) -> DeskResult<&mut Scenario> {
        self.scenarios
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| DeskError::UnknownScenario { name: name.to_string() })
    }
}

fn load_json_or<T: DeserializeOwned>(
    store: &DeskStore,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> DeskResult<T> {
    Ok(match store.load_blob(key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("session: blob '{key}' unreadable ({e}), using defaults");
                fallback()
            }
        },
        None => fallback(),
    })
}
