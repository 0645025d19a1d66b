//! Wording of the report messages and the number formats they use.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::analysis::goal::CategoryReduction;
use crate::analysis::monthly::{BudgetStatus, SpendingVerdict};
use crate::analysis::recommendations::Recommendation;

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1,234.56`, negative amounts as `-$1,234.56`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 2);
    let body = format!("{:.2}", rounded.abs());
    let (int_part, fraction) = body.split_once('.').unwrap_or((body.as_str(), "00"));

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${}.{}", sign, group_digits(int_part), fraction)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

pub fn format_percentage(value: Decimal, dp: u32) -> String {
    format!("{:.*}%", dp as usize, round_half_up(value, dp))
}

pub fn reduce_text(category: &str, reduction_percentage: Decimal) -> String {
    format!(
        "Reduce {} expenses by {}.\nIt seems this is an unusual spending amount for this month",
        category,
        format_percentage(reduction_percentage, 2)
    )
}

/// The surplus is written as a plain `$1300.00`, without digit grouping.
pub fn surplus_text(remaining: Decimal, savings_percentage: Decimal) -> String {
    format!(
        "Your budget has a surplus of ${:.2}.\nConsider saving {} of your income for this month.",
        round_half_up(remaining, 2),
        format_percentage(savings_percentage, 2)
    )
}

pub fn recommendation_text(recommendation: &Recommendation) -> String {
    match recommendation {
        Recommendation::Surplus {
            remaining,
            savings_percentage,
        } => surplus_text(*remaining, *savings_percentage),
        Recommendation::Reduce {
            category,
            reduction_percentage,
        } => reduce_text(category, *reduction_percentage),
    }
}

pub fn budget_text(status: &BudgetStatus) -> String {
    match status {
        BudgetStatus::WithinBudget { savings } => format!(
            "You are within budget and saving {} after carryover.",
            format_money(*savings)
        ),
        BudgetStatus::Overspending { amount } => {
            format!("You are overspending by {} after carryover.", format_money(*amount))
        },
    }
}

pub fn verdict_text(verdict: SpendingVerdict, expense_income_ratio: Decimal) -> String {
    let ratio = format_percentage(expense_income_ratio, 2);
    match verdict {
        SpendingVerdict::Saving => {
            format!("You are saving this month,\nwith an expense-to-income ratio of {}.", ratio)
        },
        SpendingVerdict::Overspending => format!(
            "Try to reduce expenses this month,\nwith an expense-to-income ratio of {}.",
            ratio
        ),
    }
}

pub fn saving_goal_text(avg_expenses: Decimal, avg_income: Decimal, goal: Decimal) -> String {
    format!(
        "Your average monthly income ({})\nand expenses ({})\nare on track to meet your savings goal of {}.\nContinue in the same course to reach your target.",
        format_money(avg_income),
        format_money(avg_expenses),
        format_money(goal)
    )
}

pub fn unreachable_goal_text() -> String {
    "You don't earn enough to make this goal!".to_string()
}

pub fn reduction_plan_text(goal: Decimal, shortfall: Decimal, reductions: &[CategoryReduction]) -> String {
    let mut text = format!(
        "Your goal was to save {}. To achieve this goal,\nyou need to reduce expenses by a total of {}.",
        format_money(goal),
        format_money(shortfall)
    );
    for reduction in reductions {
        text.push_str(&format!(
            "\n- Reduce {} from {}.",
            format_money(reduction.amount),
            reduction.category
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(5.5)), "$5.50");
        assert_eq!(format_money(dec!(999.995)), "$1,000.00");
        assert_eq!(format_money(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_money(dec!(-200)), "-$200.00");
        assert_eq!(format_money(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(21.428571), 2), "21.43%");
        assert_eq!(format_percentage(dec!(12.25), 1), "12.3%");
        assert_eq!(format_percentage(dec!(100), 1), "100.0%");
    }

    #[test]
    fn test_recommendation_texts() {
        assert_eq!(
            surplus_text(dec!(12345.678), dec!(21.428571)),
            "Your budget has a surplus of $12345.68.\nConsider saving 21.43% of your income for this month."
        );
        assert_eq!(
            reduce_text("Food", dec!(20)),
            "Reduce Food expenses by 20.00%.\nIt seems this is an unusual spending amount for this month"
        );
    }

    #[test]
    fn test_budget_text() {
        assert_eq!(
            budget_text(&BudgetStatus::WithinBudget { savings: dec!(1300) }),
            "You are within budget and saving $1,300.00 after carryover."
        );
        assert_eq!(
            budget_text(&BudgetStatus::Overspending { amount: dec!(200) }),
            "You are overspending by $200.00 after carryover."
        );
    }

    #[test]
    fn test_reduction_plan_text() {
        let reductions = vec![CategoryReduction {
            category: "Food".to_string(),
            amount: dec!(100),
        }];

        assert_eq!(
            reduction_plan_text(dec!(1300), dec!(100), &reductions),
            "Your goal was to save $1,300.00. To achieve this goal,\n\
             you need to reduce expenses by a total of $100.00.\n\
             - Reduce $100.00 from Food."
        );
    }
}
