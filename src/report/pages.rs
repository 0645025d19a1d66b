use std::io::{self, Write};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::texts::{
    budget_text, format_money, format_percentage, recommendation_text, reduction_plan_text, saving_goal_text,
    unreachable_goal_text, verdict_text,
};
use super::RenderPage;
use crate::analysis::goal::GoalAssessment;
use crate::analysis::monthly::{ExpenseShare, MonthlySummary};
use crate::analysis::Period;

const BAR_WIDTH: u32 = 40;

pub struct ExpenseDistribution {
    period: Period,
    shares: Vec<ExpenseShare>,
}

impl ExpenseDistribution {
    pub fn new(summary: &MonthlySummary) -> ExpenseDistribution {
        ExpenseDistribution {
            period: summary.period(),
            shares: summary.expenses().clone(),
        }
    }
}

fn bar(percentage: Decimal) -> String {
    let len = (percentage * Decimal::from(BAR_WIDTH) / dec!(100))
        .round()
        .to_usize()
        .unwrap_or(0);

    "#".repeat(len)
}

impl RenderPage for ExpenseDistribution {
    fn title(&self) -> String {
        format!("Expense Distribution - {}", self.period)
    }

    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.shares.is_empty() {
            return writeln!(out, "No Expenses");
        }

        let width = self
            .shares
            .iter()
            .map(|share| share.category().chars().count())
            .max()
            .unwrap_or(0);

        for share in &self.shares {
            writeln!(
                out,
                "{:<width$}  {:<bar_width$}  {:>6}  {}",
                share.category(),
                bar(share.percentage()),
                format_percentage(share.percentage(), 1),
                format_money(share.amount()),
                width = width,
                bar_width = BAR_WIDTH as usize,
            )?;
        }

        Ok(())
    }
}

pub struct FinancialSummary {
    summary: MonthlySummary,
}

impl FinancialSummary {
    pub fn new(summary: MonthlySummary) -> FinancialSummary {
        FinancialSummary { summary }
    }
}

impl RenderPage for FinancialSummary {
    fn title(&self) -> String {
        format!("Financial Summary - {}", self.summary.period())
    }

    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let summary = &self.summary;

        writeln!(out, "Total Expenses: {}", format_money(summary.total_expenses().abs()))?;
        writeln!(
            out,
            "Total Earnings (current month): {}",
            format_money(summary.total_earnings())
        )?;
        writeln!(
            out,
            "Expense-to-Income Ratio (current month): {}",
            format_percentage(summary.expense_income_ratio(), 2)
        )?;
        writeln!(out)?;
        writeln!(out, "{}", budget_text(&summary.budget_status()))?;
        writeln!(out)?;
        writeln!(out, "{}", verdict_text(summary.verdict(), summary.expense_income_ratio()))?;
        writeln!(out)?;
        writeln!(out, "Updated budget for next month: {}", format_money(summary.carryover()))?;
        writeln!(out)?;
        writeln!(out, "Recommendations:")?;
        for recommendation in summary.recommendations() {
            writeln!(out, "{}", recommendation_text(recommendation))?;
        }

        Ok(())
    }
}

pub struct SavingsGoal {
    assessment: GoalAssessment,
}

impl SavingsGoal {
    pub fn new(assessment: GoalAssessment) -> SavingsGoal {
        SavingsGoal { assessment }
    }
}

impl RenderPage for SavingsGoal {
    fn title(&self) -> String {
        "Savings Goal".to_string()
    }

    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let text = match &self.assessment {
            GoalAssessment::OnTrack {
                avg_income,
                avg_expenses,
                goal,
            } => saving_goal_text(*avg_expenses, *avg_income, *goal),
            GoalAssessment::Unreachable { .. } => unreachable_goal_text(),
            GoalAssessment::ReductionPlan {
                goal,
                shortfall,
                reductions,
            } => reduction_plan_text(*goal, *shortfall, reductions),
        };

        writeln!(out, "{}", text)
    }
}
