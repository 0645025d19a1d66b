use std::collections::{BTreeMap, BTreeSet};
use std::slice::Iter;

use rust_decimal::Decimal;

use super::{AnalysisError, OrOverflow, Period, Transaction};

/// Net totals keyed by category name, in category order.
pub type CategoryTotals = BTreeMap<String, Decimal>;

#[derive(Debug, Default)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            transactions: Vec::new(),
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transactions_iter(&self) -> Iter<Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct months present in the ledger, oldest first.
    pub fn periods(&self) -> Vec<Period> {
        self.transactions
            .iter()
            .map(Transaction::period)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Net amount per category for a single month.
    pub fn category_totals(&self, period: Period) -> Result<CategoryTotals, AnalysisError> {
        let mut totals = CategoryTotals::new();
        for transaction in self.transactions.iter().filter(|tx| tx.period() == period) {
            accumulate(totals.entry(transaction.category.clone()).or_default(), transaction.amount)?;
        }

        Ok(totals)
    }

    /// Net amount per category for every month that has transactions.
    pub fn monthly_category_totals(&self) -> Result<BTreeMap<Period, CategoryTotals>, AnalysisError> {
        let mut totals: BTreeMap<Period, CategoryTotals> = BTreeMap::new();
        for transaction in &self.transactions {
            let total = totals
                .entry(transaction.period())
                .or_default()
                .entry(transaction.category.clone())
                .or_default();
            accumulate(total, transaction.amount)?;
        }

        Ok(totals)
    }

    /// Sums of the positive and of the negative transaction amounts per month.
    /// Only individual transactions are considered, not category nets.
    pub fn monthly_income_and_expenses(&self) -> Result<BTreeMap<Period, (Decimal, Decimal)>, AnalysisError> {
        let mut totals: BTreeMap<Period, (Decimal, Decimal)> = BTreeMap::new();
        for transaction in &self.transactions {
            let (income, expenses) = totals.entry(transaction.period()).or_default();
            if transaction.amount > Decimal::ZERO {
                accumulate(income, transaction.amount)?;
            } else if transaction.amount < Decimal::ZERO {
                accumulate(expenses, transaction.amount)?;
            }
        }

        Ok(totals)
    }
}

fn accumulate(total: &mut Decimal, amount: Decimal) -> Result<(), AnalysisError> {
    *total = total.checked_add(amount).or_overflow("monthly totals")?;

    Ok(())
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Ledger {
            transactions: iter.into_iter().collect(),
        }
    }
}
