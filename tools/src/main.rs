//! desk-runner: headless front end for the silver pricing desk.
//!
//! Usage:
//!   desk-runner --db desk.db
//!   desk-runner --db desk.db --weight 2.2 --labor 1.5 --rate 42 --json
//!   desk-runner --db desk.db --ipc-mode

use anyhow::Result;
use silverdesk_core::{
    command::EditCommand,
    config::DeskConfig,
    inputs::{ExpenseSet, MarketInput, ProductInput},
    scenario::{Scenario, ScenarioResult},
    session::DeskSession,
    store::DeskStore,
    types::Lira,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Edit { command: EditCommand },
    Evaluate,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    product: ProductInput,
    market: MarketInput,
    expenses: ExpenseSet,
    scenarios: Vec<Scenario>,
    dollar_amount: f64,
    product_amount: Lira,
    purchase_price: Lira,
    results: Vec<ScenarioResult>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let settings_path = args
        .windows(2)
        .find(|w| w[0] == "--settings")
        .map(|w| w[1].to_string());
    let json_output = args.iter().any(|a| a == "--json");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let store = DeskStore::open(db)?;
    store.migrate()?;

    let mut session = DeskSession::load(&store)?;
    if let Some(path) = settings_path {
        session.config = DeskConfig::load(&path)?;
        session.settle();
        log::info!("loaded settings from {path}");
    }

    // Input overrides from the command line, applied as edit commands
    // so the usual settle pass runs after each one.
    if let Some(grams) = parse_flag::<f64>(&args, "--weight") {
        session.apply(EditCommand::SetWeight { grams })?;
    }
    if let Some(usd) = parse_flag::<f64>(&args, "--labor") {
        session.apply(EditCommand::SetLaborCost { usd })?;
    }
    if let Some(rate) = parse_flag::<f64>(&args, "--rate") {
        session.apply(EditCommand::SetUsdRate { rate })?;
    }

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else if json_output {
        println!("{}", serde_json::to_string_pretty(&build_ui_state(&session))?);
    } else {
        print_results(&session);
    }

    session.save(&store)?;
    Ok(())
}

fn run_ipc_loop(session: &mut DeskSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState | IpcCommand::Evaluate => {
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(session))?)?;
            }
            IpcCommand::Edit { command } => {
                if let Err(e) = session.apply(command) {
                    let err_json = serde_json::json!({ "error": e.to_string() });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    continue;
                }
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(session))?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(session: &DeskSession) -> UiState {
    UiState {
        product: session.product,
        market: session.market,
        expenses: session.expenses,
        scenarios: session.scenarios.clone(),
        dollar_amount: session.product.dollar_amount(),
        product_amount: session.product_amount(),
        purchase_price: session.purchase_price(),
        results: session.evaluate(),
    }
}

fn print_results(session: &DeskSession) {
    println!("=== SILVER DESK ===");
    println!("  weight:          {:.2} g", session.product.weight_grams);
    println!("  labor:           ${:.2}", session.product.labor_cost_usd);
    println!("  usd rate:        {:.2} TL", session.market.usd_to_lira);
    println!("  dollar amount:   ${:.2}", session.product.dollar_amount());
    println!("  product amount:  {:.2} TL", session.product_amount());
    println!("  purchase price:  {:.2} TL", session.purchase_price());
    println!();

    println!(
        "  {:<14} {:>6} {:>9} {:>10} {:>9} {:>10} {:>7}",
        "scenario", "comm%", "sale", "profit", "margin%", "deposit", "score"
    );
    for r in session.evaluate() {
        println!(
            "  {:<14} {:>6.1} {:>9.2} {:>10.2} {:>9.2} {:>10.2} {:>7.1}",
            r.scenario_name,
            r.commission_rate,
            r.sale_price,
            r.net_profit,
            r.profit_margin,
            r.net_deposit,
            r.optimum_score,
        );
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
