use getset::{CopyGetters, Getters};
use log::{debug, info};
use rust_decimal::Decimal;

use super::ledger::Ledger;
use super::recommendations::{calculate_savings_recommendations, Recommendation};
use super::{checked_sum, percentage, AnalysisError, OrOverflow, Period};
use crate::config::ReportConfig;

/// Where the month stands once the carried-over budget is included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    WithinBudget { savings: Decimal },
    Overspending { amount: Decimal },
}

impl BudgetStatus {
    /// The signed balance rolled into the next month.
    pub fn carryover(&self) -> Decimal {
        match self {
            BudgetStatus::WithinBudget { savings } => *savings,
            BudgetStatus::Overspending { amount } if amount.is_zero() => Decimal::ZERO,
            BudgetStatus::Overspending { amount } => -*amount,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::WithinBudget { .. } => "within_budget",
            BudgetStatus::Overspending { .. } => "overspending",
        }
    }
}

/// Verdict for the month on its own, ignoring any carryover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingVerdict {
    Saving,
    Overspending,
}

#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct ExpenseShare {
    #[getset(get = "pub")]
    category: String,
    /// Absolute amount spent.
    #[getset(get_copy = "pub")]
    amount: Decimal,
    /// Share of the month's expenses in percent.
    #[getset(get_copy = "pub")]
    percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct MonthlySummary {
    #[getset(get_copy = "pub")]
    period: Period,
    #[getset(get = "pub")]
    expenses: Vec<ExpenseShare>,
    /// Sum of the expense categories, negative or zero.
    #[getset(get_copy = "pub")]
    total_expenses: Decimal,
    #[getset(get_copy = "pub")]
    total_earnings: Decimal,
    #[getset(get_copy = "pub")]
    expense_income_ratio: Decimal,
    #[getset(get_copy = "pub")]
    verdict: SpendingVerdict,
    #[getset(get_copy = "pub")]
    budget_status: BudgetStatus,
    #[getset(get = "pub")]
    recommendations: Vec<Recommendation>,
}

impl MonthlySummary {
    pub fn carryover(&self) -> Decimal {
        self.budget_status.carryover()
    }
}

/// Summarizes every month in chronological order, rolling the surplus or
/// deficit of each month into the next one.
pub fn process_financial_data(ledger: &Ledger, config: &ReportConfig) -> Result<Vec<MonthlySummary>, AnalysisError> {
    let mut summaries = Vec::new();
    let mut carryover = Decimal::ZERO;

    for period in ledger.periods() {
        let totals = ledger.category_totals(period)?;

        let expense_totals: Vec<(String, Decimal)> = totals
            .iter()
            .filter(|(_, amount)| **amount < Decimal::ZERO)
            .map(|(category, amount)| (category.clone(), *amount))
            .collect();
        let total_expenses = checked_sum(expense_totals.iter().map(|(_, amount)| amount), "monthly expenses")?;
        let total_earnings = checked_sum(totals.values().filter(|amount| **amount > Decimal::ZERO), "monthly income")?;
        let spent = total_expenses.abs();

        let expense_income_ratio = if total_earnings.is_zero() {
            Decimal::ZERO
        } else {
            percentage(spent, total_earnings, "expense-to-income ratio")?
        };

        let available = total_earnings.checked_add(carryover).or_overflow("carried-over budget")?;
        let budget_status = if available > spent {
            BudgetStatus::WithinBudget {
                savings: available.checked_sub(spent).or_overflow("carried-over budget")?,
            }
        } else {
            BudgetStatus::Overspending {
                amount: spent.checked_sub(available).or_overflow("carried-over budget")?,
            }
        };

        let verdict = if total_earnings > spent {
            SpendingVerdict::Saving
        } else {
            SpendingVerdict::Overspending
        };

        let mut expenses = Vec::with_capacity(expense_totals.len());
        for (category, amount) in expense_totals {
            expenses.push(ExpenseShare {
                category,
                amount: amount.abs(),
                percentage: percentage(amount.abs(), spent, "expense share")?,
            });
        }

        debug!(
            "period {}: earnings={}, expenses={}, carryover in={}, carryover out={}",
            period,
            total_earnings,
            total_expenses,
            carryover,
            budget_status.carryover()
        );
        carryover = budget_status.carryover();

        summaries.push(MonthlySummary {
            period,
            expenses,
            total_expenses,
            total_earnings,
            expense_income_ratio,
            verdict,
            budget_status,
            recommendations: calculate_savings_recommendations(ledger, period, config)?,
        });
    }

    info!("processed {} months", summaries.len());

    Ok(summaries)
}
