//! CSV input records for debts, incomes and simulation settings.
//!
//! Fields are read as strings and parsed by hand so that blank cells can fall
//! back to [`LendingDefaults`] and every problem can be reported with its row.
//! Percentages are written as percent values (`3.66`) and stored as fractions
//! (`0.0366`).

use crate::config::{EffortLevel, LendingDefaults, PostDebtPolicy, SimulationConfig, Strategy};
use crate::debt::{resolve_priority, Debt, DebtProduct};
use crate::error::{PlannerError, Result};
use crate::income::Income;
use crate::money::Money;
use csv::{ReaderBuilder, Trim};
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

type FieldResult<T> = std::result::Result<T, String>;

/// Raw debt row as read from CSV.
///
/// Only `type` and `name` are required; which other columns matter depends
/// on the type.
#[derive(Debug, Default, Deserialize)]
pub struct DebtRecord {
    /// expense, rent, mortgage, credit_card, overdraft, loan or other
    #[serde(rename = "type")]
    pub debt_type: String,

    pub name: String,

    /// Interest-bearing balance outstanding
    pub balance: Option<String>,

    pub monthly_rate_pct: Option<String>,

    /// Fixed monthly amount for expenses, card installment plans and loans
    pub installment: Option<String>,

    /// Remaining term in months
    pub months: Option<String>,

    pub min_payment_pct: Option<String>,

    pub mandatory_principal_pct: Option<String>,

    /// Explicit order under the user-defined strategy
    pub priority: Option<String>,
}

impl DebtRecord {
    /// Parses the row into a product and its explicit priority, if any.
    pub fn parse(&self, defaults: &LendingDefaults) -> FieldResult<(DebtProduct, Option<u32>)> {
        let debt_type = self.debt_type.trim().to_lowercase();
        let priority = parse_opt::<u32>(&self.priority, "priority")?;

        let product = match debt_type.as_str() {
            "expense" => DebtProduct::FixedExpense {
                amount: required_amount(&self.installment, "installment")?,
                months: self.months_or(0)?,
            },
            "rent" => DebtProduct::Rent {
                amount: required_amount(&self.installment, "installment")?,
            },
            "mortgage" => DebtProduct::MortgageInstallment {
                amount: required_amount(&self.installment, "installment")?,
                months: self.months_or(0)?,
            },
            "credit_card" => {
                let months = self.months_or(0)?;
                DebtProduct::CreditCard {
                    installment: amount_or_zero(&self.installment, "installment")?,
                    installment_months: self.capped_months(
                        months,
                        defaults.card_installment_max_months,
                    ),
                    balance: amount_or_zero(&self.balance, "balance")?,
                    monthly_interest_rate: parse_pct(&self.monthly_rate_pct, "monthly_rate_pct")?
                        .unwrap_or(defaults.card_monthly_interest_rate),
                    minimum_percentage: parse_pct(&self.min_payment_pct, "min_payment_pct")?
                        .unwrap_or(defaults.card_minimum_payment_percentage),
                }
            }
            "overdraft" => DebtProduct::Overdraft {
                balance: required_amount(&self.balance, "balance")?,
                monthly_interest_rate: parse_pct(&self.monthly_rate_pct, "monthly_rate_pct")?
                    .unwrap_or(defaults.overdraft_monthly_interest_rate),
                mandatory_principal_percentage: parse_pct(
                    &self.mandatory_principal_pct,
                    "mandatory_principal_pct",
                )?
                .unwrap_or(Decimal::ZERO),
            },
            "loan" => {
                let months = parse_opt::<u32>(&self.months, "months")?
                    .ok_or_else(|| "missing months".to_string())?;
                DebtProduct::InstallmentLoan {
                    balance: required_amount(&self.balance, "balance")?,
                    installment: required_amount(&self.installment, "installment")?,
                    months: self.capped_months(months, defaults.loan_max_months),
                    monthly_interest_rate: required_pct(&self.monthly_rate_pct, "monthly_rate_pct")?,
                }
            }
            "other" => DebtProduct::OtherInterestBearing {
                balance: required_amount(&self.balance, "balance")?,
                monthly_interest_rate: required_pct(&self.monthly_rate_pct, "monthly_rate_pct")?,
            },
            other => return Err(format!("unknown debt type '{}'", other)),
        };

        Ok((product, priority))
    }

    fn months_or(&self, default: u32) -> FieldResult<u32> {
        Ok(parse_opt::<u32>(&self.months, "months")?.unwrap_or(default))
    }

    fn capped_months(&self, months: u32, max: u32) -> u32 {
        if months > max {
            warn!(
                "{}: term of {} months exceeds the {}-month limit, using {}",
                self.name.trim(),
                months,
                max,
                max
            );
            max
        } else {
            months
        }
    }
}

/// Raw income row as read from CSV.
#[derive(Debug, Default, Deserialize)]
pub struct IncomeRecord {
    pub name: String,
    pub amount: String,
    pub start_month: Option<String>,
    pub annual_growth_pct: Option<String>,
    pub one_time: Option<String>,
}

impl IncomeRecord {
    pub fn parse(&self) -> FieldResult<Income> {
        let amount = parse_amount(&Some(self.amount.clone()), "amount")?
            .ok_or_else(|| "missing amount".to_string())?;
        let start_month = parse_opt::<u32>(&self.start_month, "start_month")?.unwrap_or(1);
        if start_month == 0 {
            return Err("start_month is 1-indexed".to_string());
        }

        Ok(Income {
            name: self.name.trim().to_string(),
            amount,
            start_month,
            annual_growth_rate: parse_growth_pct(&self.annual_growth_pct, "annual_growth_pct")?
                .unwrap_or(Decimal::ZERO),
            is_one_time: parse_flag(&self.one_time)?,
        })
    }
}

/// Raw simulation settings as read from CSV. Blank fields keep their default.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigRecord {
    pub starting_savings: Option<String>,
    pub monthly_savings: Option<String>,
    pub interest_multiplier: Option<String>,
    /// A number or an effort preset name
    pub aggressiveness: Option<String>,
    pub annual_savings_growth_pct: Option<String>,
    pub strategy: Option<String>,
    /// A number or a post-debt preset name
    pub post_debt_savings_ratio: Option<String>,
    pub min_months: Option<String>,
}

impl ConfigRecord {
    pub fn parse(&self) -> FieldResult<SimulationConfig> {
        let mut config = SimulationConfig::default();

        if let Some(savings) = parse_amount(&self.starting_savings, "starting_savings")? {
            config.starting_savings = savings;
        }
        if let Some(monthly) = parse_amount(&self.monthly_savings, "monthly_savings")? {
            config.monthly_savings_contribution = monthly;
        }
        if let Some(multiplier) = parse_opt::<Decimal>(&self.interest_multiplier, "interest_multiplier")? {
            config.interest_rate_multiplier = multiplier;
        }
        if let Some(raw) = non_blank(&self.aggressiveness) {
            config.aggressiveness = match Decimal::from_str(raw) {
                Ok(value) => value,
                Err(_) => EffortLevel::from_str(raw)?.multiplier(),
            };
        }
        if let Some(pct) = parse_opt::<Decimal>(&self.annual_savings_growth_pct, "annual_savings_growth_pct")? {
            config.monthly_savings_growth_rate = SimulationConfig::monthly_rate_from_annual_pct(pct);
        }
        if let Some(raw) = non_blank(&self.strategy) {
            config.strategy = Strategy::from_str(raw)?;
        }
        if let Some(raw) = non_blank(&self.post_debt_savings_ratio) {
            let ratio = match Decimal::from_str(raw) {
                Ok(value) => value,
                Err(_) => PostDebtPolicy::from_str(raw)?.savings_ratio(),
            };
            if ratio < Decimal::ZERO || ratio > Decimal::ONE {
                return Err(format!("post_debt_savings_ratio {} is outside 0..=1", ratio));
            }
            config.post_debt_savings_ratio = ratio;
        }
        if let Some(months) = parse_opt::<u32>(&self.min_months, "min_months")? {
            config.min_months = months;
        }

        Ok(config)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_opt<T: FromStr>(field: &Option<String>, name: &str) -> FieldResult<Option<T>> {
    match non_blank(field) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("invalid {} '{}'", name, raw)),
    }
}

fn parse_amount(field: &Option<String>, name: &str) -> FieldResult<Option<Money>> {
    match parse_opt::<Money>(field, name)? {
        Some(amount) if amount < Money::ZERO => Err(format!("{} must not be negative", name)),
        amount => Ok(amount),
    }
}

fn required_amount(field: &Option<String>, name: &str) -> FieldResult<Money> {
    parse_amount(field, name)?.ok_or_else(|| format!("missing {}", name))
}

fn amount_or_zero(field: &Option<String>, name: &str) -> FieldResult<Money> {
    Ok(parse_amount(field, name)?.unwrap_or(Money::ZERO))
}

fn parse_pct(field: &Option<String>, name: &str) -> FieldResult<Option<Decimal>> {
    match parse_opt::<Decimal>(field, name)? {
        Some(pct) if pct < Decimal::ZERO => Err(format!("{} must not be negative", name)),
        pct => Ok(pct.map(|p| p / dec!(100))),
    }
}

/// Like `parse_pct`, but a falling income down to -100% is allowed.
fn parse_growth_pct(field: &Option<String>, name: &str) -> FieldResult<Option<Decimal>> {
    match parse_opt::<Decimal>(field, name)? {
        Some(pct) if pct < dec!(-100) => Err(format!("{} must not be below -100", name)),
        pct => Ok(pct.map(|p| p / dec!(100))),
    }
}

fn required_pct(field: &Option<String>, name: &str) -> FieldResult<Decimal> {
    parse_pct(field, name)?.ok_or_else(|| format!("missing {}", name))
}

fn parse_flag(field: &Option<String>) -> FieldResult<bool> {
    match non_blank(field).map(str::to_lowercase).as_deref() {
        None | Some("false") | Some("no") | Some("0") => Ok(false),
        Some("true") | Some("yes") | Some("1") => Ok(true),
        Some(other) => Err(format!("invalid one_time flag '{}'", other)),
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Reads debts from CSV in streaming fashion.
///
/// Invalid rows are logged at warn level and skipped. Rows without an
/// explicit priority are ordered after all explicitly prioritized debts.
pub fn read_debts<R: Read>(reader: R, defaults: &LendingDefaults) -> Result<Vec<Debt>> {
    let mut debts = Vec::new();
    let mut products = 0usize;

    for (row_idx, result) in csv_reader(reader).deserialize::<DebtRecord>().enumerate() {
        let row = row_idx + 2; // 1-indexed, accounting for header row

        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(|record| {
                record
                    .parse(defaults)
                    .map(|(product, priority)| (record.name.trim().to_string(), product, priority))
            });

        match parsed {
            Ok((name, product, priority)) => {
                let priority = resolve_priority(priority, products);
                products += 1;
                debts.extend(product.into_debts(&name, priority));
            }
            Err(message) => warn!("{}", PlannerError::InvalidRecord { row, message }),
        }
    }

    Ok(debts)
}

/// Reads incomes from CSV. Invalid rows are logged and skipped.
pub fn read_incomes<R: Read>(reader: R) -> Result<Vec<Income>> {
    let mut incomes = Vec::new();

    for (row_idx, result) in csv_reader(reader).deserialize::<IncomeRecord>().enumerate() {
        let row = row_idx + 2;

        match result.map_err(|e| e.to_string()).and_then(|r| r.parse()) {
            Ok(income) => incomes.push(income),
            Err(message) => warn!("{}", PlannerError::InvalidRecord { row, message }),
        }
    }

    Ok(incomes)
}

/// Reads simulation settings from the first data row of a CSV file.
///
/// Unlike debt and income rows, a bad settings row is an error.
pub fn read_config<R: Read>(reader: R) -> Result<SimulationConfig> {
    let mut csv_reader = csv_reader(reader);
    let record = csv_reader
        .deserialize::<ConfigRecord>()
        .next()
        .ok_or_else(|| PlannerError::InvalidConfig("no settings row".to_string()))??;

    record.parse().map_err(PlannerError::InvalidConfig)
}
