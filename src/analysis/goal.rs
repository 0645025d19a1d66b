use std::collections::BTreeMap;

use log::info;
use rust_decimal::Decimal;

use super::ledger::Ledger;
use super::{mean, AnalysisError, OrOverflow, Period};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReduction {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GoalAssessment {
    /// Average monthly net already covers the goal.
    OnTrack {
        avg_income: Decimal,
        avg_expenses: Decimal,
        goal: Decimal,
    },
    /// Average income alone is below the goal.
    Unreachable { avg_income: Decimal, goal: Decimal },
    /// Reaching the goal needs the listed cuts, proportional to each
    /// category's average monthly expense.
    ReductionPlan {
        goal: Decimal,
        shortfall: Decimal,
        reductions: Vec<CategoryReduction>,
    },
}

pub fn evaluate_savings_goal(ledger: &Ledger, goal: Decimal) -> Result<GoalAssessment, AnalysisError> {
    if goal < Decimal::ZERO {
        return Err(AnalysisError::NegativeGoal(goal));
    }

    let monthly = ledger.monthly_income_and_expenses()?;
    let incomes: Vec<Decimal> = monthly.values().map(|(income, _)| *income).collect();
    let expenses: Vec<Decimal> = monthly.values().map(|(_, expenses)| *expenses).collect();

    let avg_income = mean(&incomes, "average income")?.ok_or(AnalysisError::EmptyLedger)?;
    let avg_expenses = mean(&expenses, "average expenses")?
        .ok_or(AnalysisError::EmptyLedger)?
        .abs();
    let avg_net = avg_income.checked_sub(avg_expenses).or_overflow("average net income")?;

    info!(
        "savings goal {}: average income={}, average expenses={}",
        goal, avg_income, avg_expenses
    );

    if avg_net >= goal {
        return Ok(GoalAssessment::OnTrack {
            avg_income,
            avg_expenses,
            goal,
        });
    }

    if avg_income < goal {
        return Ok(GoalAssessment::Unreachable { avg_income, goal });
    }

    // avg_income >= goal > avg_net, so avg_expenses is positive
    let shortfall = goal.checked_sub(avg_net).or_overflow("savings shortfall")?;
    let reduction_ratio = shortfall.checked_div(avg_expenses).or_overflow("reduction ratio")?;

    let mut reductions = Vec::new();
    for (category, average) in average_category_expenses(ledger)? {
        reductions.push(CategoryReduction {
            category,
            amount: reduction_ratio.checked_mul(average).or_overflow("category reduction")?,
        });
    }

    Ok(GoalAssessment::ReductionPlan {
        goal,
        shortfall,
        reductions,
    })
}

/// Average absolute monthly expense per category, over the months in which
/// the category has negative transactions.
fn average_category_expenses(ledger: &Ledger) -> Result<BTreeMap<String, Decimal>, AnalysisError> {
    let mut monthly: BTreeMap<String, BTreeMap<Period, Decimal>> = BTreeMap::new();
    for transaction in ledger.transactions_iter().filter(|tx| tx.amount < Decimal::ZERO) {
        let total = monthly
            .entry(transaction.category.clone())
            .or_default()
            .entry(transaction.period())
            .or_default();
        *total = total.checked_add(transaction.amount).or_overflow("category expenses")?;
    }

    let mut averages = BTreeMap::new();
    for (category, months) in monthly {
        let totals: Vec<Decimal> = months.into_values().collect();
        if let Some(average) = mean(&totals, "category expenses")? {
            averages.insert(category, average.abs());
        }
    }

    Ok(averages)
}
