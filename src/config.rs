//! Simulation parameters and product defaults.

use crate::money::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use std::str::FromStr;

/// Order in which surplus cash is directed at interest-bearing debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Highest monthly rate first, larger balance breaking ties.
    #[default]
    Avalanche,

    /// Smallest balance first.
    Snowball,

    /// Ascending user-assigned priority.
    UserDefined,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Avalanche, Strategy::Snowball, Strategy::UserDefined];
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            "user" | "user_defined" | "user-defined" => Ok(Strategy::UserDefined),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
            Strategy::UserDefined => "user",
        };
        f.write_str(name)
    }
}

/// Named aggressiveness presets for the surplus multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffortLevel {
    /// No extra payments beyond minimums.
    Minimum,
    Cautious,
    Maximum,
    /// Pays 1.5x the surplus, eating into other spending.
    Overdrive,
}

impl EffortLevel {
    pub fn multiplier(self) -> Decimal {
        match self {
            EffortLevel::Minimum => Decimal::ZERO,
            EffortLevel::Cautious => dec!(0.5),
            EffortLevel::Maximum => Decimal::ONE,
            EffortLevel::Overdrive => dec!(1.5),
        }
    }
}

impl FromStr for EffortLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimum" => Ok(EffortLevel::Minimum),
            "cautious" => Ok(EffortLevel::Cautious),
            "maximum" => Ok(EffortLevel::Maximum),
            "overdrive" => Ok(EffortLevel::Overdrive),
            other => Err(format!("unknown effort level '{}'", other)),
        }
    }
}

/// Named presets for the share of post-debt surplus kept as savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDebtPolicy {
    AllToSavings,
    Split,
    AllToSpending,
}

impl PostDebtPolicy {
    pub fn savings_ratio(self) -> Decimal {
        match self {
            PostDebtPolicy::AllToSavings => Decimal::ONE,
            PostDebtPolicy::Split => dec!(0.5),
            PostDebtPolicy::AllToSpending => Decimal::ZERO,
        }
    }
}

impl FromStr for PostDebtPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(PostDebtPolicy::AllToSavings),
            "split" => Ok(PostDebtPolicy::Split),
            "spending" => Ok(PostDebtPolicy::AllToSpending),
            other => Err(format!("unknown post-debt policy '{}'", other)),
        }
    }
}

/// Parameters of one simulation run. Immutable for the duration of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub starting_savings: Money,

    /// Set aside every month before any surplus is computed.
    pub monthly_savings_contribution: Money,

    /// Stress-test lever applied to every monthly interest rate.
    pub interest_rate_multiplier: Decimal,

    /// Scales surplus cash while interest-bearing debt remains.
    pub aggressiveness: Decimal,

    /// Fractional growth applied to the savings balance each month.
    pub monthly_savings_growth_rate: Decimal,

    pub strategy: Strategy,

    /// Share of post-debt surplus routed to savings; the rest is spent.
    pub post_debt_savings_ratio: Decimal,

    /// Months simulated even if no interest-bearing debt remains.
    pub min_months: u32,
}

impl SimulationConfig {
    /// Converts an annual savings growth percentage to a monthly rate.
    pub fn monthly_rate_from_annual_pct(annual_pct: Decimal) -> Decimal {
        annual_pct / dec!(12) / dec!(100)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            starting_savings: Money::ZERO,
            monthly_savings_contribution: Money::ZERO,
            interest_rate_multiplier: Decimal::ONE,
            aggressiveness: Decimal::ONE,
            monthly_savings_growth_rate: Decimal::ZERO,
            strategy: Strategy::Avalanche,
            post_debt_savings_ratio: Decimal::ONE,
            min_months: 1,
        }
    }
}

/// Fallback product terms used when an input row leaves a field blank.
///
/// Rates and percentages are fractions, not percent values.
#[derive(Debug, Clone, PartialEq)]
pub struct LendingDefaults {
    pub card_installment_max_months: u32,
    pub card_minimum_payment_percentage: Decimal,
    pub card_monthly_interest_rate: Decimal,
    pub overdraft_monthly_interest_rate: Decimal,
    pub loan_max_months: u32,
}

impl Default for LendingDefaults {
    fn default() -> Self {
        LendingDefaults {
            card_installment_max_months: 12,
            card_minimum_payment_percentage: dec!(0.20),
            card_monthly_interest_rate: dec!(0.0366),
            overdraft_monthly_interest_rate: dec!(0.05),
            loan_max_months: 36,
        }
    }
}
