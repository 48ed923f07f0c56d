//! Debt Planner CLI
//!
//! Reads debts, incomes and optional settings from CSV files and writes the
//! month-by-month repayment ledger as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- debts.csv incomes.csv [config.csv] > ledger.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` for a run summary, `debug` for payoff events

use debt_planner::{
    read_config, read_debts, read_incomes, simulate, write_ledger, LendingDefaults, PlannerError,
    Result, SimulationConfig,
};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(PlannerError::MissingArgument);
    }

    let debts = read_debts(open(&args[1])?, &LendingDefaults::default())?;
    let incomes = read_incomes(open(&args[2])?)?;
    let config = match args.get(3) {
        Some(path) => read_config(open(path)?)?,
        None => SimulationConfig::default(),
    };

    let stdout = io::stdout();
    let handle = stdout.lock();

    match simulate(&debts, &incomes, &config) {
        Some(result) => {
            info!(
                "{} strategy: {} months, interest paid {}, final savings {}, starting debt {}",
                config.strategy,
                result.months,
                result.total_interest,
                result.final_savings,
                result.starting_debt
            );
            if !result.converged {
                info!("Debt not cleared; {} still owed", result.remaining_debt);
            }
            write_ledger(&result.ledger, handle)?;
        }
        None => {
            info!("No debts or no incomes; nothing to simulate");
            write_ledger(&[], handle)?;
        }
    }

    Ok(())
}

fn open(path: &str) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}
