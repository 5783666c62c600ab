//! Scenario list policy tests: numbering, the never-empty invariant,
//! rename rules, and system-priced refresh.

use silverdesk_core::{
    config::DeskConfig,
    error::DeskError,
    inputs::{ExpenseSet, MarketInput, ProductInput},
    policy, pricing,
    scenario::{PricingMode, Scenario, ScenarioClass, DEFAULT_SCENARIO_NAME},
};

fn manual(name: &str, sale_price: f64) -> Scenario {
    Scenario {
        name: name.to_string(),
        commission_rate: 22.0,
        sale_price,
        target_margin: None,
        pricing: PricingMode::ManuallyPriced,
    }
}

const AMOUNT: f64 = 138.60;

#[test]
fn added_scenarios_take_the_next_free_number() {
    let config = DeskConfig::default();
    let mut scenarios = vec![policy::standard_scenario(AMOUNT, &config)];

    assert_eq!(policy::add_scenario(&mut scenarios, AMOUNT, &config), "Scenario 1");
    assert_eq!(policy::add_scenario(&mut scenarios, AMOUNT, &config), "Scenario 2");
    assert_eq!(scenarios.len(), 3);
}

#[test]
fn numbering_continues_past_gaps() {
    let config = DeskConfig::default();
    let mut scenarios = vec![
        policy::standard_scenario(AMOUNT, &config),
        manual("Scenario 5", 400.0),
    ];

    assert_eq!(policy::add_scenario(&mut scenarios, AMOUNT, &config), "Scenario 6");
}

#[test]
fn new_scenario_copies_the_default_price() {
    let config = DeskConfig::default();
    let mut standard = policy::standard_scenario(AMOUNT, &config);
    standard.sale_price = 629.0;
    let mut scenarios = vec![standard];

    policy::add_scenario(&mut scenarios, AMOUNT, &config);
    let added = scenarios.last().unwrap();
    assert_eq!(added.sale_price, 629.0);
    assert_eq!(added.commission_rate, config.default_commission_rate);
    assert_eq!(added.pricing, PricingMode::ManuallyPriced);
    assert_eq!(added.target_margin, None);
}

#[test]
fn new_scenario_without_default_prices_at_double_amount() {
    let config = DeskConfig::default();
    let mut scenarios = vec![manual("Trendyol", 500.0)];

    policy::add_scenario(&mut scenarios, AMOUNT, &config);
    assert_eq!(scenarios.last().unwrap().sale_price, (AMOUNT * 2.0).round());
}

#[test]
fn removing_the_last_scenario_rebuilds_the_default() {
    let config = DeskConfig::default();
    let mut scenarios = vec![manual("Trendyol", 500.0)];

    policy::remove_scenario(&mut scenarios, "Trendyol", AMOUNT, &config).unwrap();

    assert_eq!(scenarios.len(), 1, "the list is never allowed to be empty");
    let rebuilt = &scenarios[0];
    assert_eq!(rebuilt.name, DEFAULT_SCENARIO_NAME);
    assert_eq!(rebuilt.pricing, PricingMode::SystemPriced);
    assert_eq!(rebuilt.sale_price, (AMOUNT * 2.0).round());
    assert_eq!(rebuilt.target_margin, Some(config.default_target_margin));
}

#[test]
fn removing_one_of_many_keeps_the_rest() {
    let config = DeskConfig::default();
    let mut scenarios = vec![
        policy::standard_scenario(AMOUNT, &config),
        manual("Scenario 1", 400.0),
    ];

    policy::remove_scenario(&mut scenarios, "Scenario 1", AMOUNT, &config).unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].name, DEFAULT_SCENARIO_NAME);
}

#[test]
fn removing_an_unknown_name_is_an_error() {
    let config = DeskConfig::default();
    let mut scenarios = vec![policy::standard_scenario(AMOUNT, &config)];

    let err = policy::remove_scenario(&mut scenarios, "Nope", AMOUNT, &config).unwrap_err();
    assert!(matches!(err, DeskError::UnknownScenario { .. }));
    assert_eq!(scenarios.len(), 1, "a failed removal must not change the list");
}

#[test]
fn renaming_the_default_is_a_no_op() {
    let config = DeskConfig::default();
    let mut scenarios = vec![policy::standard_scenario(AMOUNT, &config)];

    policy::rename_scenario(&mut scenarios, DEFAULT_SCENARIO_NAME, "My Shop").unwrap();
    assert_eq!(scenarios[0].name, DEFAULT_SCENARIO_NAME, "default name is immutable");
}

#[test]
fn renaming_a_custom_scenario_works_and_allows_duplicates() {
    let config = DeskConfig::default();
    let mut scenarios = vec![
        policy::standard_scenario(AMOUNT, &config),
        manual("Scenario 1", 400.0),
        manual("Etsy", 500.0),
    ];

    policy::rename_scenario(&mut scenarios, "Scenario 1", "Etsy").unwrap();
    let etsy_count = scenarios.iter().filter(|s| s.name == "Etsy").count();
    assert_eq!(etsy_count, 2, "uniqueness is not enforced by the policy");
}

#[test]
fn refresh_reprices_only_system_priced_scenarios() {
    let config = DeskConfig::default();
    let product = ProductInput::default();
    let market = MarketInput::default();
    let expenses = ExpenseSet::default();

    let mut scenarios = vec![
        policy::standard_scenario(AMOUNT, &config),
        manual("Scenario 1", 400.0),
    ];

    let touched = policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);
    assert_eq!(touched, 1, "only the default is system-priced");

    let expected = pricing::standard_sale_price(&product, &market, &expenses, 22.0, 30.0, &config);
    assert_eq!(scenarios[0].sale_price, expected);
    assert_eq!(scenarios[1].sale_price, 400.0, "manual prices are never overwritten");
}

#[test]
fn refresh_converges_in_a_single_pass() {
    let config = DeskConfig::default();
    let product = ProductInput::default();
    let market = MarketInput::default();
    let expenses = ExpenseSet::default();
    let mut scenarios = vec![policy::standard_scenario(AMOUNT, &config)];

    let first = policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);
    let second = policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);

    assert!(first <= 1);
    assert_eq!(second, 0, "settling a stable input set must be a fixed point");
}

#[test]
fn refresh_skips_changes_within_tolerance() {
    let config = DeskConfig::default();
    let product = ProductInput::default();
    let market = MarketInput::default();
    let expenses = ExpenseSet::default();

    let mut scenarios = vec![policy::standard_scenario(AMOUNT, &config)];
    policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);

    // Nudge the stored price by less than the tolerance: no churn.
    scenarios[0].sale_price += policy::PRICE_TOLERANCE / 2.0;
    let touched = policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);
    assert_eq!(touched, 0, "sub-tolerance deltas must not be overwritten");
}

#[test]
fn refresh_defaults_a_zero_commission_rate() {
    let config = DeskConfig::default();
    let product = ProductInput::default();
    let market = MarketInput::default();
    let expenses = ExpenseSet::default();

    let mut zeroed = policy::standard_scenario(AMOUNT, &config);
    zeroed.commission_rate = 0.0;
    let mut scenarios = vec![zeroed];

    policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);
    let expected = pricing::standard_sale_price(
        &product,
        &market,
        &expenses,
        config.default_commission_rate,
        config.default_target_margin,
        &config,
    );
    assert_eq!(scenarios[0].sale_price, expected, "commission 0 falls back to the default rate");
}

#[test]
fn refresh_follows_an_edited_target_margin() {
    let config = DeskConfig::default();
    let product = ProductInput::default();
    let market = MarketInput::default();
    let expenses = ExpenseSet::default();

    let mut scenarios = vec![policy::standard_scenario(AMOUNT, &config)];
    policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);

    scenarios[0].target_margin = Some(15.0);
    let touched = policy::refresh_system_priced(&mut scenarios, &product, &market, &expenses, &config);

    assert_eq!(touched, 1, "a margin edit must trigger a reprice");
    let expected = pricing::standard_sale_price(&product, &market, &expenses, 22.0, 15.0, &config);
    assert_eq!(scenarios[0].sale_price, expected);
}

#[test]
fn classification_is_resolved_from_the_name() {
    assert_eq!(ScenarioClass::of("Standard"), ScenarioClass::Default);
    assert_eq!(ScenarioClass::of("Scenario 7"), ScenarioClass::Numbered(7));
    assert_eq!(ScenarioClass::of("Scenario x"), ScenarioClass::Custom);
    assert_eq!(ScenarioClass::of("Trendyol"), ScenarioClass::Custom);
}
