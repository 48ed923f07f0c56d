//! Income streams.

use crate::money::Money;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A recurring or one-time cash inflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub name: String,

    /// Base monthly amount at `start_month`.
    pub amount: Money,

    /// First month (1-indexed) in which the income is received.
    pub start_month: u32,

    /// Fractional yearly growth, compounded per elapsed month. Negative for a
    /// shrinking income; -1 or below drops it to zero after the start month.
    pub annual_growth_rate: Decimal,

    /// Paid once, in `start_month` only.
    pub is_one_time: bool,
}

impl Income {
    pub fn recurring(name: impl Into<String>, amount: Money) -> Self {
        Income {
            name: name.into(),
            amount,
            start_month: 1,
            annual_growth_rate: Decimal::ZERO,
            is_one_time: false,
        }
    }

    /// A windfall received in a single month.
    pub fn one_time(name: impl Into<String>, amount: Money, month: u32) -> Self {
        Income {
            name: name.into(),
            amount,
            start_month: month,
            annual_growth_rate: Decimal::ZERO,
            is_one_time: true,
        }
    }

    /// Amount received in `month` (1-indexed).
    ///
    /// Grows by `(1 + annual_growth_rate) ^ (elapsed / 12)` where `elapsed`
    /// counts months since `start_month`.
    pub fn amount_for_month(&self, month: u32) -> Money {
        if month < self.start_month {
            return Money::ZERO;
        }
        if self.is_one_time {
            return if month == self.start_month {
                self.amount
            } else {
                Money::ZERO
            };
        }

        let elapsed = month - self.start_month;
        if elapsed == 0 || self.annual_growth_rate.is_zero() {
            return self.amount;
        }

        let base = Decimal::ONE + self.annual_growth_rate;
        if base <= Decimal::ZERO {
            return Money::ZERO;
        }
        let exponent = Decimal::from(elapsed) / MONTHS_PER_YEAR;
        let factor = base
            .checked_powd(exponent)
            .unwrap_or(Decimal::MAX);
        self.amount * factor
    }
}

/// Total income received across all streams in `month`.
pub fn total_for_month(incomes: &[Income], month: u32) -> Money {
    incomes.iter().map(|i| i.amount_for_month(month)).sum()
}
