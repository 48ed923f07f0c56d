//! Minimum-payment rules.

use crate::debt::{Debt, MinimumPaymentRule};
use crate::money::Money;
use rust_decimal::Decimal;

/// Mandatory payment owed on `debt` this month.
///
/// Fixed kinds owe their installment unconditionally; percentage kinds owe a
/// share of the current principal. `_rate_multiplier` is the run's stress
/// multiplier.
///
/// This does not cap the payment at the balance owed; the engine does that
/// when it applies the payment.
pub fn minimum_payment(debt: &Debt, _rate_multiplier: Decimal) -> Money {
    match debt.rule {
        MinimumPaymentRule::FixedExpense { installment }
        | MinimumPaymentRule::FixedInstallmentExpense { installment }
        | MinimumPaymentRule::FixedInstallmentPrincipal { installment } => installment,
        MinimumPaymentRule::PercentageOfPrincipal { minimum_percentage } => {
            debt.principal * minimum_percentage
        }
        MinimumPaymentRule::InterestPlusMandatoryPrincipal {
            mandatory_principal_percentage,
        } => debt.principal * mandatory_principal_percentage,
    }
}
