//! # Debt Planner
//!
//! A month-by-month debt repayment simulator for a household with several
//! debts and income streams.
//!
//! ## Design Principles
//!
//! - **Decimal arithmetic**: Uses `rust_decimal` at full precision; ledger
//!   figures are rounded to whole currency units only when a row is written
//! - **Closed rule set**: Every debt carries one [`MinimumPaymentRule`] variant
//! - **Pure engine**: A run works on copies of its inputs and never fails;
//!   non-convergence is reported through [`SimulationResult::converged`]
//! - **Deterministic output**: Same inputs, same ledger
//!
//! ## Example
//!
//! ```
//! use debt_planner::{simulate, Debt, Income, MinimumPaymentRule, Money, SimulationConfig};
//! use rust_decimal_macros::dec;
//!
//! let card = Debt::revolving(
//!     "Card",
//!     Money::from_units(100_000),
//!     dec!(0.03),
//!     MinimumPaymentRule::PercentageOfPrincipal { minimum_percentage: dec!(0.02) },
//!     1,
//! );
//! let salary = Income::recurring("Salary", Money::from_units(20_000));
//!
//! let result = simulate(&[card], &[salary], &SimulationConfig::default()).unwrap();
//! assert!(result.converged);
//! ```

pub mod config;
pub mod debt;
pub mod engine;
pub mod error;
pub mod income;
pub mod input;
pub mod money;
pub mod rules;

pub use config::{EffortLevel, LendingDefaults, PostDebtPolicy, SimulationConfig, Strategy};
pub use debt::{Debt, DebtProduct, MinimumPaymentRule, Term};
pub use engine::{
    compare_strategies, simulate, sort_by_strategy, write_ledger, DebtSimulator,
    MonthlyLedgerEntry, SimulationResult, MAX_SIMULATION_MONTHS,
};
pub use error::{PlannerError, Result};
pub use income::Income;
pub use input::{read_config, read_debts, read_incomes};
pub use money::Money;
pub use rules::minimum_payment;
