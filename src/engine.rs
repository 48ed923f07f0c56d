//! Month-stepping debt repayment simulator.
//!
//! Each simulated month runs the same ordered pipeline: income, mandatory
//! outflows and minimum payments, surplus ("attack power"), post-debt
//! reallocation, interest accrual, strategy ordering, surplus application,
//! savings growth and finally one ledger row. The simulator works on its own
//! copy of the debts so callers' records are never mutated.

use crate::config::{SimulationConfig, Strategy};
use crate::debt::{Debt, MinimumPaymentRule};
use crate::error::Result;
use crate::income::{self, Income};
use crate::money::Money;
use crate::rules::minimum_payment;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::io::Write;

/// Hard stop for runs whose debts never close.
pub const MAX_SIMULATION_MONTHS: u32 = 360;

/// One month of simulation output.
///
/// Monetary fields are whole currency units, rounded half-to-even when the
/// row is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyLedgerEntry {
    /// 1-indexed month number.
    pub month: u32,

    pub income: i64,

    /// Savings contribution, fixed expenses and post-debt spending.
    pub mandatory_expense: i64,

    pub minimum_payments: i64,

    /// Surplus directed at debt, or at savings once debt is cleared.
    pub attack_power: i64,

    /// Portion of the attack power actually paid onto debts.
    pub surplus_applied: i64,

    /// Mandatory savings plus surplus left after debt payments.
    pub savings_contribution: i64,

    /// Debts paid off this month, in the order they closed.
    pub closed_debts: Vec<String>,

    /// Interest-bearing principal left at month end.
    pub remaining_debt: i64,

    pub savings_balance: i64,
}

impl MonthlyLedgerEntry {
    pub fn label(&self) -> String {
        format!("Month {}", self.month)
    }
}

/// Output of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub ledger: Vec<MonthlyLedgerEntry>,
    pub months: u32,
    pub total_interest: Money,
    pub final_savings: Money,

    /// Interest-bearing principal before the first month.
    pub starting_debt: Money,

    /// Interest-bearing principal after the last month.
    pub remaining_debt: Money,

    /// `false` when the run hit [`MAX_SIMULATION_MONTHS`] with debt still open.
    pub converged: bool,
}

/// Sorts debts into the order surplus is applied under `strategy`.
///
/// Sorting is stable, so equal keys keep their existing order.
pub fn sort_by_strategy(debts: &mut [Debt], strategy: Strategy) {
    match strategy {
        Strategy::Avalanche => debts.sort_by(|a, b| {
            (b.monthly_interest_rate, b.principal).cmp(&(a.monthly_interest_rate, a.principal))
        }),
        Strategy::Snowball => debts.sort_by_key(|d| d.principal),
        Strategy::UserDefined => debts.sort_by_key(|d| d.priority),
    }
}

/// Sum of principal over debts that are not fixed expenses.
fn interest_bearing_principal(debts: &[Debt]) -> Money {
    debts
        .iter()
        .filter(|d| !d.is_fixed_expense())
        .map(|d| d.principal)
        .sum()
}

/// Working state of a single simulation run.
pub struct DebtSimulator {
    debts: Vec<Debt>,
    incomes: Vec<Income>,
    config: SimulationConfig,
    month: u32,
    savings: Money,
    total_interest: Money,
    starting_debt: Money,
    ledger: Vec<MonthlyLedgerEntry>,
}

impl DebtSimulator {
    /// Creates a simulator over copies of the given debts and incomes.
    ///
    /// Returns `None` when either list is empty; there is nothing to simulate.
    pub fn new(debts: &[Debt], incomes: &[Income], config: &SimulationConfig) -> Option<Self> {
        if debts.is_empty() || incomes.is_empty() {
            return None;
        }

        Some(DebtSimulator {
            debts: debts.to_vec(),
            incomes: incomes.to_vec(),
            config: config.clone(),
            month: 0,
            savings: config.starting_savings,
            total_interest: Money::ZERO,
            starting_debt: interest_bearing_principal(debts),
            ledger: Vec::new(),
        })
    }

    /// Current working set, in the order of the last strategy sort.
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    /// Number of months simulated so far.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn has_open_debt(&self) -> bool {
        self.debts.iter().any(Debt::is_open)
    }

    /// Whether another month should be simulated.
    pub fn should_continue(&self) -> bool {
        if self.month >= MAX_SIMULATION_MONTHS {
            return false;
        }
        self.month < self.config.min_months.max(1) || self.has_open_debt()
    }

    /// Runs until every interest-bearing debt is closed or the cap is hit.
    pub fn run(mut self) -> SimulationResult {
        while self.should_continue() {
            self.step();
        }

        let remaining_debt = interest_bearing_principal(&self.debts);
        let converged = !self.has_open_debt();
        if !converged {
            warn!(
                "Stopped after {} months with {} still owed",
                self.month, remaining_debt
            );
        }

        SimulationResult {
            ledger: self.ledger,
            months: self.month,
            total_interest: self.total_interest,
            final_savings: self.savings,
            starting_debt: self.starting_debt,
            remaining_debt,
            converged,
        }
    }

    /// Simulates one month and returns its ledger row.
    pub fn step(&mut self) -> &MonthlyLedgerEntry {
        let month = self.month + 1;
        let multiplier = self.config.interest_rate_multiplier;

        let income = income::total_for_month(&self.incomes, month);

        let mut mandatory_expense = self.config.monthly_savings_contribution
            + self
                .debts
                .iter()
                .filter(|d| d.is_fixed_expense())
                .filter_map(Debt::fixed_installment)
                .sum::<Money>();
        let minimums_due: Vec<Money> = self.debts.iter().map(|d| self.minimum_due(d)).collect();
        let minimum_payments: Money = minimums_due.iter().copied().sum();

        let free_cash = (income - mandatory_expense - minimum_payments).non_negative();
        let debt_remaining = self.has_open_debt();
        let attack_power = if debt_remaining {
            free_cash * self.config.aggressiveness
        } else {
            let to_savings = free_cash * self.config.post_debt_savings_ratio;
            mandatory_expense += free_cash - to_savings;
            to_savings
        };

        let mut closed_debts = Vec::new();
        for (debt, due) in self.debts.iter_mut().zip(&minimums_due) {
            if !debt.is_open() {
                continue;
            }

            let interest = debt.principal * debt.monthly_interest_rate * multiplier;
            self.total_interest += interest;
            debt.principal = (debt.principal + interest - *due).non_negative();

            if let MinimumPaymentRule::FixedInstallmentPrincipal { .. } = debt.rule {
                debt.term.advance();
            }

            if !debt.principal.is_outstanding() {
                debt.principal = Money::ZERO;
                debug!("Month {}: {} paid off by minimum payment", month, debt.name);
                closed_debts.push(debt.name.clone());
            }
        }

        if debt_remaining {
            sort_by_strategy(&mut self.debts, self.config.strategy);
        }

        let mut surplus = attack_power;
        for debt in self.debts.iter_mut() {
            if surplus <= Money::ZERO {
                break;
            }
            if !debt.is_open() {
                continue;
            }

            let payment = surplus.min(debt.principal);
            debt.principal -= payment;
            surplus -= payment;

            if !debt.principal.is_outstanding() {
                debt.principal = Money::ZERO;
                debug!("Month {}: {} paid off with surplus", month, debt.name);
                closed_debts.push(debt.name.clone());
            }
        }
        let surplus_applied = attack_power - surplus;

        // The contribution column includes the mandatory share; only the
        // unapplied surplus accumulates in the balance.
        let savings_contribution = self.config.monthly_savings_contribution + surplus;
        self.savings += surplus;
        self.savings = self.savings * (Decimal::ONE + self.config.monthly_savings_growth_rate);

        self.month = month;
        self.ledger.push(MonthlyLedgerEntry {
            month,
            income: income.whole_units(),
            mandatory_expense: mandatory_expense.whole_units(),
            minimum_payments: minimum_payments.whole_units(),
            attack_power: attack_power.whole_units(),
            surplus_applied: surplus_applied.whole_units(),
            savings_contribution: savings_contribution.whole_units(),
            closed_debts,
            remaining_debt: interest_bearing_principal(&self.debts).whole_units(),
            savings_balance: self.savings.whole_units(),
        });

        &self.ledger[self.ledger.len() - 1]
    }

    /// Minimum payment actually owed this month, capped at the balance
    /// including this month's interest. Fixed expenses and closed debts owe
    /// nothing here; fixed expenses are counted separately.
    fn minimum_due(&self, debt: &Debt) -> Money {
        if !debt.is_open() {
            return Money::ZERO;
        }
        let multiplier = self.config.interest_rate_multiplier;
        let interest = debt.principal * debt.monthly_interest_rate * multiplier;
        minimum_payment(debt, multiplier).min(debt.principal + interest)
    }
}

/// Runs one simulation over copies of `debts` and `incomes`.
///
/// Returns `None` when either input list is empty.
pub fn simulate(
    debts: &[Debt],
    incomes: &[Income],
    config: &SimulationConfig,
) -> Option<SimulationResult> {
    DebtSimulator::new(debts, incomes, config).map(DebtSimulator::run)
}

/// Runs one independent simulation per strategy, in [`Strategy::ALL`] order.
///
/// Returns an empty list when either input list is empty.
pub fn compare_strategies(
    debts: &[Debt],
    incomes: &[Income],
    config: &SimulationConfig,
) -> Vec<(Strategy, SimulationResult)> {
    Strategy::ALL
        .iter()
        .filter_map(|&strategy| {
            let config = SimulationConfig {
                strategy,
                ..config.clone()
            };
            simulate(debts, incomes, &config).map(|result| (strategy, result))
        })
        .collect()
}

/// Writes ledger rows as CSV.
///
/// Closed debts are joined with `"; "`, or written as `-` when none closed.
pub fn write_ledger<W: Write>(ledger: &[MonthlyLedgerEntry], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "month",
        "income",
        "mandatory_expense",
        "minimum_payments",
        "attack_power",
        "surplus_applied",
        "savings_contribution",
        "closed_debts",
        "remaining_debt",
        "savings_balance",
    ])?;

    for entry in ledger {
        let closed = if entry.closed_debts.is_empty() {
            "-".to_string()
        } else {
            entry.closed_debts.join("; ")
        };

        csv_writer.write_record([
            entry.label(),
            entry.income.to_string(),
            entry.mandatory_expense.to_string(),
            entry.minimum_payments.to_string(),
            entry.attack_power.to_string(),
            entry.surplus_applied.to_string(),
            entry.savings_contribution.to_string(),
            closed,
            entry.remaining_debt.to_string(),
            entry.savings_balance.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::{DebtProduct, Term};
    use rust_decimal_macros::dec;

    fn card(name: &str, balance: i64, rate: Decimal, minimum: Decimal) -> Debt {
        Debt::revolving(
            name,
            Money::from_units(balance),
            rate,
            MinimumPaymentRule::PercentageOfPrincipal {
                minimum_percentage: minimum,
            },
            1,
        )
    }

    fn salary(amount: i64) -> Income {
        Income::recurring("Salary", Money::from_units(amount))
    }

    fn principal_of(sim: &DebtSimulator, name: &str) -> Money {
        sim.debts()
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.principal)
            .unwrap()
    }

    #[test]
    fn test_single_card_is_paid_off() {
        let debts = vec![card("Card", 100_000, dec!(0.03), dec!(0.02))];
        let incomes = vec![salary(20_000)];

        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();

        assert!(result.converged);
        assert_eq!(result.months, 6);
        assert_eq!(result.ledger.len(), 6);
        assert!(result.total_interest > Money::ZERO);
        assert_eq!(result.starting_debt, Money::from_units(100_000));

        let last = result.ledger.last().unwrap();
        assert_eq!(last.remaining_debt, 0);
        assert_eq!(last.closed_debts, vec!["Card".to_string()]);
    }

    #[test]
    fn test_first_month_figures() {
        let debts = vec![card("Card", 100_000, dec!(0.03), dec!(0.02))];
        let incomes = vec![salary(20_000)];

        let mut sim = DebtSimulator::new(&debts, &incomes, &SimulationConfig::default()).unwrap();
        let row = sim.step().clone();

        assert_eq!(row.label(), "Month 1");
        assert_eq!(row.income, 20_000);
        assert_eq!(row.mandatory_expense, 0);
        assert_eq!(row.minimum_payments, 2_000);
        assert_eq!(row.attack_power, 18_000);
        assert_eq!(row.surplus_applied, 18_000);
        assert_eq!(row.savings_contribution, 0);
        // 100,000 + 3,000 interest - 2,000 minimum - 18,000 surplus
        assert_eq!(row.remaining_debt, 83_000);
        assert_eq!(principal_of(&sim, "Card"), Money::from_units(83_000));
    }

    #[test]
    fn test_empty_input_returns_none() {
        let config = SimulationConfig::default();
        assert!(simulate(&[], &[], &config).is_none());
        assert!(simulate(&[], &[salary(1_000)], &config).is_none());
        assert!(simulate(&[card("Card", 1_000, dec!(0.01), dec!(0.1))], &[], &config).is_none());
        assert!(compare_strategies(&[], &[], &config).is_empty());
    }

    #[test]
    fn test_caller_records_are_not_mutated() {
        let debts = vec![card("Card", 50_000, dec!(0.03), dec!(0.02))];
        let incomes = vec![salary(20_000)];
        let before = debts.clone();

        simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();

        assert_eq!(debts, before);
    }

    #[test]
    fn test_minimum_of_one_month_when_nothing_is_owed() {
        let debts = vec![Debt::fixed_expense("Rent", Money::from_units(5_000), Term::Unbounded)];
        let incomes = vec![salary(20_000)];

        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();

        assert_eq!(result.months, 1);
        assert!(result.converged);
        assert_eq!(result.starting_debt, Money::ZERO);
    }

    #[test]
    fn test_post_debt_split_routes_half_to_spending() {
        let debts = vec![Debt::fixed_expense("Rent", Money::from_units(5_000), Term::Unbounded)];
        let incomes = vec![salary(20_000)];
        let config = SimulationConfig {
            post_debt_savings_ratio: dec!(0.5),
            ..SimulationConfig::default()
        };

        let result = simulate(&debts, &incomes, &config).unwrap();
        let row = &result.ledger[0];

        assert_eq!(row.attack_power, 7_500);
        assert_eq!(row.mandatory_expense, 5_000 + 7_500);
        assert_eq!(row.surplus_applied, 0);
        assert_eq!(row.savings_contribution, 7_500);
        assert_eq!(row.savings_balance, 7_500);
    }

    #[test]
    fn test_post_debt_reallocation_after_last_debt_closes() {
        let debts = vec![card("Card", 10_000, dec!(0.0), dec!(0.1))];
        let incomes = vec![salary(20_000)];
        let config = SimulationConfig {
            post_debt_savings_ratio: dec!(0.5),
            aggressiveness: dec!(0.5),
            min_months: 2,
            ..SimulationConfig::default()
        };

        let result = simulate(&debts, &incomes, &config).unwrap();
        assert_eq!(result.months, 2);

        // Month 1: 1,000 minimum, half of the remaining 19,000 goes to the card
        let first = &result.ledger[0];
        assert_eq!(first.attack_power, 9_500);
        assert_eq!(first.surplus_applied, 9_000);
        assert_eq!(first.closed_debts, vec!["Card".to_string()]);

        // Month 2: unscaled surplus split between savings and spending
        let second = &result.ledger[1];
        assert_eq!(second.minimum_payments, 0);
        assert_eq!(second.attack_power, 10_000);
        assert_eq!(second.mandatory_expense, 10_000);
        assert_eq!(second.savings_contribution, 10_000);
        assert_eq!(second.savings_balance, 500 + 10_000);
    }

    #[test]
    fn test_one_time_income_counts_once() {
        let debts = vec![card("Card", 1_000_000, dec!(0.01), dec!(0.02))];
        let incomes = vec![
            salary(30_000),
            Income::one_time("Bonus", Money::from_units(50_000), 2),
        ];

        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();

        assert_eq!(result.ledger[0].income, 30_000);
        assert_eq!(result.ledger[1].income, 80_000);
        assert_eq!(result.ledger[2].income, 30_000);
        assert_eq!(result.ledger[3].income, 30_000);
    }

    #[test]
    fn test_unpaid_debt_grows_every_month() {
        let debts = DebtProduct::OtherInterestBearing {
            balance: Money::from_units(10_000),
            monthly_interest_rate: dec!(0.02),
        }
        .into_debts("Loan shark", 1);
        let incomes = vec![salary(1_000)];
        let config = SimulationConfig {
            aggressiveness: Decimal::ZERO,
            ..SimulationConfig::default()
        };

        let mut sim = DebtSimulator::new(&debts, &incomes, &config).unwrap();
        let mut previous = principal_of(&sim, "Loan shark");
        for _ in 0..12 {
            sim.step();
            let current = principal_of(&sim, "Loan shark");
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn test_runaway_debt_stops_at_cap() {
        let debts = DebtProduct::OtherInterestBearing {
            balance: Money::from_units(10_000),
            monthly_interest_rate: dec!(0.02),
        }
        .into_debts("Loan shark", 1);
        let incomes = vec![salary(1_000)];
        let config = SimulationConfig {
            aggressiveness: Decimal::ZERO,
            ..SimulationConfig::default()
        };

        let result = simulate(&debts, &incomes, &config).unwrap();

        assert_eq!(result.months, MAX_SIMULATION_MONTHS);
        assert_eq!(result.ledger.len(), MAX_SIMULATION_MONTHS as usize);
        assert!(!result.converged);
        assert!(result.remaining_debt > result.starting_debt);
        assert!(result.ledger.last().unwrap().remaining_debt > 0);
    }

    #[test]
    fn test_debt_within_tolerance_is_closed_and_zeroed() {
        let debts = vec![card("Card", 1_000, Decimal::ZERO, Decimal::ZERO)];
        let incomes = vec![Income::recurring("Salary", Money::new(dec!(999.5)))];

        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();

        assert_eq!(result.months, 1);
        assert!(result.converged);
        assert_eq!(result.remaining_debt, Money::ZERO);
        assert_eq!(result.ledger[0].closed_debts, vec!["Card".to_string()]);
    }

    #[test]
    fn test_avalanche_pays_highest_rate_first() {
        let debts = vec![
            card("Cheap", 10_000, dec!(0.01), Decimal::ZERO),
            card("Expensive", 10_000, dec!(0.05), Decimal::ZERO),
        ];
        let incomes = vec![salary(3_000)];

        let mut sim = DebtSimulator::new(&debts, &incomes, &SimulationConfig::default()).unwrap();
        sim.step();

        assert_eq!(sim.debts()[0].name, "Expensive");
        assert_eq!(principal_of(&sim, "Expensive"), Money::from_units(10_500 - 3_000));
        assert_eq!(principal_of(&sim, "Cheap"), Money::from_units(10_100));
    }

    #[test]
    fn test_avalanche_breaks_rate_ties_by_larger_balance() {
        let mut debts = vec![
            card("Small", 1_000, dec!(0.03), Decimal::ZERO),
            card("Large", 9_000, dec!(0.03), Decimal::ZERO),
            card("Top", 500, dec!(0.04), Decimal::ZERO),
        ];
        sort_by_strategy(&mut debts, Strategy::Avalanche);

        let names: Vec<_> = debts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "Large", "Small"]);
    }

    #[test]
    fn test_snowball_pays_smallest_balance_first() {
        let debts = vec![
            card("Big", 20_000, dec!(0.05), Decimal::ZERO),
            card("Small", 2_000, dec!(0.01), Decimal::ZERO),
        ];
        let incomes = vec![salary(3_000)];
        let config = SimulationConfig {
            strategy: Strategy::Snowball,
            ..SimulationConfig::default()
        };

        let mut sim = DebtSimulator::new(&debts, &incomes, &config).unwrap();
        let row = sim.step().clone();

        assert_eq!(row.closed_debts, vec!["Small".to_string()]);
        // 3,000 surplus: 2,020 clears Small, the rest goes to Big
        assert_eq!(principal_of(&sim, "Big"), Money::from_units(21_000 - 980));
    }

    #[test]
    fn test_user_defined_order_follows_priority() {
        let mut first = card("First", 20_000, dec!(0.01), Decimal::ZERO);
        first.priority = 1;
        let mut second = card("Second", 1_000, dec!(0.05), Decimal::ZERO);
        second.priority = 2;
        let debts = vec![second, first];
        let incomes = vec![salary(5_000)];
        let config = SimulationConfig {
            strategy: Strategy::UserDefined,
            ..SimulationConfig::default()
        };

        let mut sim = DebtSimulator::new(&debts, &incomes, &config).unwrap();
        sim.step();

        assert_eq!(principal_of(&sim, "First"), Money::from_units(20_200 - 5_000));
        assert_eq!(principal_of(&sim, "Second"), Money::from_units(1_050));
    }

    #[test]
    fn test_fixed_expenses_are_paid_but_not_amortized() {
        let mut debts = DebtProduct::CreditCard {
            installment: Money::from_units(1_000),
            installment_months: 3,
            balance: Money::from_units(4_000),
            monthly_interest_rate: dec!(0.03),
            minimum_percentage: dec!(0.25),
        }
        .into_debts("Card", 1);
        debts.push(Debt::fixed_expense("Rent", Money::from_units(5_000), Term::Unbounded));
        let incomes = vec![salary(8_000)];

        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();
        let row = &result.ledger[0];

        assert_eq!(row.mandatory_expense, 6_000);
        assert_eq!(row.minimum_payments, 1_000);
        assert_eq!(row.attack_power, 1_000);
        // 4,000 + 120 interest - 1,000 minimum - 1,000 surplus
        assert_eq!(row.remaining_debt, 2_120);
        assert_eq!(result.starting_debt, Money::from_units(4_000));
    }

    #[test]
    fn test_loan_minimum_is_capped_at_balance_owed() {
        let debts = DebtProduct::InstallmentLoan {
            balance: Money::from_units(500),
            installment: Money::from_units(2_500),
            months: 12,
            monthly_interest_rate: Decimal::ZERO,
        }
        .into_debts("Loan", 1);
        let incomes = vec![salary(10_000)];

        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();
        let row = &result.ledger[0];

        assert_eq!(result.months, 1);
        assert_eq!(row.minimum_payments, 500);
        assert_eq!(row.attack_power, 9_500);
        assert_eq!(row.surplus_applied, 0);
        assert_eq!(row.closed_debts, vec!["Loan".to_string()]);
    }

    #[test]
    fn test_loan_term_counts_down() {
        let debts = DebtProduct::InstallmentLoan {
            balance: Money::from_units(100_000),
            installment: Money::from_units(5_000),
            months: 24,
            monthly_interest_rate: dec!(0.02),
        }
        .into_debts("Loan", 1);
        let incomes = vec![salary(5_000)];

        let mut sim = DebtSimulator::new(&debts, &incomes, &SimulationConfig::default()).unwrap();
        for _ in 0..3 {
            sim.step();
        }

        assert_eq!(sim.month(), 3);
        assert_eq!(sim.debts()[0].term, Term::Remaining(21));
    }

    #[test]
    fn test_interest_multiplier_scales_accrual() {
        let debts = vec![card("Card", 10_000, dec!(0.02), Decimal::ZERO)];
        let incomes = vec![salary(1_000)];
        let stressed = SimulationConfig {
            interest_rate_multiplier: dec!(2),
            aggressiveness: Decimal::ZERO,
            ..SimulationConfig::default()
        };

        let mut sim = DebtSimulator::new(&debts, &incomes, &stressed).unwrap();
        sim.step();

        assert_eq!(principal_of(&sim, "Card"), Money::from_units(10_400));
    }

    #[test]
    fn test_mandatory_contribution_stays_out_of_savings_balance() {
        let debts = vec![Debt::fixed_expense("Rent", Money::from_units(8_000), Term::Unbounded)];
        let incomes = vec![salary(10_000)];
        let config = SimulationConfig {
            monthly_savings_contribution: Money::from_units(2_000),
            ..SimulationConfig::default()
        };

        let result = simulate(&debts, &incomes, &config).unwrap();
        let row = &result.ledger[0];

        assert_eq!(row.mandatory_expense, 10_000);
        assert_eq!(row.savings_contribution, 2_000);
        assert_eq!(row.savings_balance, 0);
        assert_eq!(result.final_savings, Money::ZERO);
    }

    #[test]
    fn test_savings_balance_grows_with_unapplied_surplus() {
        let debts = vec![Debt::fixed_expense("Rent", Money::from_units(6_000), Term::Unbounded)];
        let incomes = vec![salary(10_000)];
        let config = SimulationConfig {
            starting_savings: Money::from_units(1_000),
            monthly_savings_contribution: Money::from_units(2_000),
            monthly_savings_growth_rate: dec!(0.01),
            ..SimulationConfig::default()
        };

        let result = simulate(&debts, &incomes, &config).unwrap();
        let row = &result.ledger[0];

        // No interest-bearing debt: the 2000 left over goes to savings
        assert_eq!(row.mandatory_expense, 8_000);
        assert_eq!(row.attack_power, 2_000);
        assert_eq!(row.savings_contribution, 4_000);
        assert_eq!(result.final_savings, Money::from_units(3_030));
        assert_eq!(row.savings_balance, 3_030);
    }

    #[test]
    fn test_compare_strategies_runs_each_independently() {
        let debts = vec![
            card("Big", 40_000, dec!(0.04), dec!(0.02)),
            card("Small", 5_000, dec!(0.01), dec!(0.02)),
        ];
        let incomes = vec![salary(10_000)];

        let results = compare_strategies(&debts, &incomes, &SimulationConfig::default());

        let strategies: Vec<_> = results.iter().map(|(s, _)| *s).collect();
        assert_eq!(strategies, Strategy::ALL.to_vec());
        for (_, result) in &results {
            assert!(result.converged);
            assert_eq!(result.starting_debt, Money::from_units(45_000));
        }

        let avalanche = &results[0].1;
        let snowball = &results[1].1;
        assert!(avalanche.total_interest <= snowball.total_interest);
    }

    #[test]
    fn test_write_ledger() {
        let debts = vec![card("Card A", 1_000, Decimal::ZERO, Decimal::ZERO)];
        let incomes = vec![salary(600)];
        let result = simulate(&debts, &incomes, &SimulationConfig::default()).unwrap();

        let mut output = Vec::new();
        write_ledger(&result.ledger, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with(
            "month,income,mandatory_expense,minimum_payments,attack_power,surplus_applied,savings_contribution,closed_debts,remaining_debt,savings_balance"
        ));
        assert!(output.contains("Month 1,600,0,0,600,600,0,-,400,0"));
        assert!(output.contains("Month 2,600,0,0,600,400,200,Card A,0,200"));
    }
}
