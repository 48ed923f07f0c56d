//! Debt line items and the products they are built from.
//!
//! A [`Debt`] is one obligation tracked by the simulator: an interest-bearing
//! balance, or a fixed recurring expense with no balance to amortize. Debts
//! are normally created through [`DebtProduct::into_debts`], which maps a
//! user-facing product (credit card, overdraft, loan, rent, ...) onto exactly
//! one [`MinimumPaymentRule`] per resulting debt.

use crate::money::Money;
use rust_decimal::Decimal;

/// Priorities assigned automatically start here, after any explicit order.
pub const AUTO_PRIORITY_OFFSET: u32 = 1000;

/// How the mandatory monthly payment of a debt is determined.
///
/// Each variant carries exactly the inputs its formula needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimumPaymentRule {
    /// Recurring non-amortizing cost such as rent or a grocery budget.
    FixedExpense { installment: Money },

    /// Installment plan on a credit card; paid as a fixed expense.
    FixedInstallmentExpense { installment: Money },

    /// Amortizing loan repaid in fixed installments.
    FixedInstallmentPrincipal { installment: Money },

    /// Revolving credit-card balance with a minimum share of principal due.
    PercentageOfPrincipal { minimum_percentage: Decimal },

    /// Overdraft or other interest-bearing line with a mandatory principal share.
    InterestPlusMandatoryPrincipal {
        mandatory_principal_percentage: Decimal,
    },
}

impl MinimumPaymentRule {
    /// Returns `true` for the kinds treated as recurring expenses.
    ///
    /// These never accrue interest, never receive surplus and do not count
    /// towards the interest-bearing balance.
    pub fn is_fixed_expense(&self) -> bool {
        matches!(
            self,
            MinimumPaymentRule::FixedExpense { .. }
                | MinimumPaymentRule::FixedInstallmentExpense { .. }
        )
    }

    /// Fixed installment amount, for the rule kinds that have one.
    pub fn fixed_installment(&self) -> Option<Money> {
        match *self {
            MinimumPaymentRule::FixedExpense { installment }
            | MinimumPaymentRule::FixedInstallmentExpense { installment }
            | MinimumPaymentRule::FixedInstallmentPrincipal { installment } => Some(installment),
            MinimumPaymentRule::PercentageOfPrincipal { .. }
            | MinimumPaymentRule::InterestPlusMandatoryPrincipal { .. } => None,
        }
    }
}

/// Remaining repayment term of a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Remaining(u32),
    /// Revolving lines and open-ended expenses.
    Unbounded,
}

impl Term {
    /// Advances the term by one month, never below zero.
    pub fn advance(&mut self) {
        if let Term::Remaining(months) = self {
            *months = months.saturating_sub(1);
        }
    }
}

/// One obligation in a simulation run.
///
/// # Invariants
///
/// - `principal` is never negative
/// - A debt whose principal is at or below [`Money::CLOSING_TOLERANCE`] is
///   closed: it accrues no interest and owes no minimum payment
#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    /// Display name; not required to be unique.
    pub name: String,

    /// Outstanding balance.
    pub principal: Money,

    pub rule: MinimumPaymentRule,

    /// Order under the user-defined strategy; lower is paid first.
    pub priority: u32,

    /// Fractional monthly rate, zero for fixed expenses.
    pub monthly_interest_rate: Decimal,

    pub term: Term,
}

impl Debt {
    /// Creates a recurring fixed expense.
    pub fn fixed_expense(name: impl Into<String>, installment: Money, term: Term) -> Self {
        Debt {
            name: name.into(),
            principal: Money::ZERO,
            rule: MinimumPaymentRule::FixedExpense { installment },
            priority: 1,
            monthly_interest_rate: Decimal::ZERO,
            term,
        }
    }

    /// Creates an interest-bearing debt with an unbounded term.
    pub fn revolving(
        name: impl Into<String>,
        principal: Money,
        monthly_interest_rate: Decimal,
        rule: MinimumPaymentRule,
        priority: u32,
    ) -> Self {
        Debt {
            name: name.into(),
            principal,
            rule,
            priority,
            monthly_interest_rate,
            term: Term::Unbounded,
        }
    }

    pub fn is_fixed_expense(&self) -> bool {
        self.rule.is_fixed_expense()
    }

    /// Interest-bearing debt still above the closing tolerance.
    pub fn is_open(&self) -> bool {
        !self.is_fixed_expense() && self.principal.is_outstanding()
    }

    pub fn fixed_installment(&self) -> Option<Money> {
        self.rule.fixed_installment()
    }
}

/// A user-facing product selection, before it is split into debts.
#[derive(Debug, Clone, PartialEq)]
pub enum DebtProduct {
    /// Monthly spending basket.
    FixedExpense { amount: Money, months: u32 },

    Rent { amount: Money },

    MortgageInstallment { amount: Money, months: u32 },

    /// A card may carry an installment plan, a revolving balance, or both.
    CreditCard {
        installment: Money,
        installment_months: u32,
        balance: Money,
        monthly_interest_rate: Decimal,
        minimum_percentage: Decimal,
    },

    Overdraft {
        balance: Money,
        monthly_interest_rate: Decimal,
        mandatory_principal_percentage: Decimal,
    },

    InstallmentLoan {
        balance: Money,
        installment: Money,
        months: u32,
        monthly_interest_rate: Decimal,
    },

    OtherInterestBearing {
        balance: Money,
        monthly_interest_rate: Decimal,
    },
}

impl DebtProduct {
    /// Expands the product into the debts the simulator tracks.
    ///
    /// `priority` is the order the interest-bearing parts take under the
    /// user-defined strategy. Fixed expenses always get priority 1.
    pub fn into_debts(self, name: &str, priority: u32) -> Vec<Debt> {
        match self {
            DebtProduct::FixedExpense { amount, months }
            | DebtProduct::MortgageInstallment { amount, months } => {
                vec![Debt::fixed_expense(name, amount, Term::Remaining(months))]
            }
            DebtProduct::Rent { amount } => {
                vec![Debt::fixed_expense(name, amount, Term::Unbounded)]
            }
            DebtProduct::CreditCard {
                installment,
                installment_months,
                balance,
                monthly_interest_rate,
                minimum_percentage,
            } => {
                let mut debts = Vec::with_capacity(2);
                if installment > Money::ZERO && installment_months > 0 {
                    debts.push(Debt {
                        name: format!("{} (Installments)", name),
                        principal: installment * Decimal::from(installment_months),
                        rule: MinimumPaymentRule::FixedInstallmentExpense { installment },
                        priority: 1,
                        monthly_interest_rate: Decimal::ZERO,
                        term: Term::Remaining(installment_months),
                    });
                }
                if balance > Money::ZERO {
                    debts.push(Debt::revolving(
                        format!("{} (Statement Balance)", name),
                        balance,
                        monthly_interest_rate,
                        MinimumPaymentRule::PercentageOfPrincipal { minimum_percentage },
                        priority,
                    ));
                }
                debts
            }
            DebtProduct::Overdraft {
                balance,
                monthly_interest_rate,
                mandatory_principal_percentage,
            } => vec![Debt::revolving(
                name,
                balance,
                monthly_interest_rate,
                MinimumPaymentRule::InterestPlusMandatoryPrincipal {
                    mandatory_principal_percentage,
                },
                priority,
            )],
            DebtProduct::InstallmentLoan {
                balance,
                installment,
                months,
                monthly_interest_rate,
            } => vec![Debt {
                name: name.to_string(),
                principal: balance,
                rule: MinimumPaymentRule::FixedInstallmentPrincipal { installment },
                priority,
                monthly_interest_rate,
                term: Term::Remaining(months),
            }],
            DebtProduct::OtherInterestBearing {
                balance,
                monthly_interest_rate,
            } => vec![Debt::revolving(
                name,
                balance,
                monthly_interest_rate,
                MinimumPaymentRule::InterestPlusMandatoryPrincipal {
                    mandatory_principal_percentage: Decimal::ZERO,
                },
                priority,
            )],
        }
    }
}

/// Resolves the user-defined order of a debt.
///
/// Explicit priorities are kept; otherwise the debt is placed after every
/// explicitly ordered one, in insertion order.
pub fn resolve_priority(explicit: Option<u32>, insertion_index: usize) -> u32 {
    match explicit {
        Some(priority) => priority,
        None => AUTO_PRIORITY_OFFSET.saturating_add(insertion_index as u32),
    }
}
