//! Income, expense and balance totals in a chosen display currency

use crate::core::convert::{convert, format_amount};
use crate::core::currency::currency_symbol;
use crate::core::rates::RateTable;
use crate::core::transaction::{Transaction, TransactionKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub currency: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl BalanceSummary {
    /// Sums `transactions` after converting each amount into `display_currency`.
    ///
    /// Without a rate table amounts are summed as recorded.
    pub fn compute(
        transactions: &[Transaction],
        display_currency: &str,
        rates: Option<&RateTable>,
    ) -> Self {
        let to_display = |t: &Transaction| match rates {
            Some(rates) => convert(t.amount, &t.currency, display_currency, rates),
            None => t.amount,
        };

        let total = |kind: TransactionKind| -> f64 {
            transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(to_display)
                .sum()
        };

        let income = total(TransactionKind::Income);
        let expenses = total(TransactionKind::Expense);

        Self {
            currency: display_currency.to_string(),
            income,
            expenses,
            balance: income - expenses,
        }
    }

    pub fn income_display(&self) -> String {
        format!("+{}{}", self.symbol(), format_amount(self.income))
    }

    pub fn expenses_display(&self) -> String {
        format!("-{}{}", self.symbol(), format_amount(self.expenses))
    }

    /// Magnitude only, like the other displays; use `is_negative` for colour.
    pub fn balance_display(&self) -> String {
        format!("{}{}", self.symbol(), format_amount(self.balance))
    }

    pub fn is_negative(&self) -> bool {
        self.balance < 0.0
    }

    fn symbol(&self) -> &'static str {
        currency_symbol(&self.currency)
    }
}
