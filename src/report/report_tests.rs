use anyhow::Result;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::analysis::Transaction;

fn tx(year: i32, month: u32, day: u32, category: &str, amount: Decimal) -> Transaction {
    Transaction::new(NaiveDate::from_ymd_opt(year, month, day).unwrap(), category, amount)
}

fn steady_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    for month in 1..=3 {
        ledger.add_transaction(tx(2024, month, 1, "Salary", dec!(1400)));
        ledger.add_transaction(tx(2024, month, 10, "Food", dec!(-100)));
    }
    ledger.add_transaction(tx(2024, 4, 1, "Salary", dec!(1400)));
    ledger.add_transaction(tx(2024, 4, 10, "Food", dec!(-500)));

    ledger
}

fn render(report: &Report) -> Result<String> {
    let mut out = Vec::new();
    report.write_to(&mut out)?;

    Ok(String::from_utf8(out)?)
}

#[test]
fn test_page_order() -> Result<()> {
    let config = ReportConfig::new(Some(dec!(1000)), dec!(1000))?;
    let report = build_report(&steady_ledger(), &config)?;

    let titles: Vec<String> = report.pages().iter().map(|page| page.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Expense Distribution - 1/2024",
            "Financial Summary - 1/2024",
            "Expense Distribution - 2/2024",
            "Financial Summary - 2/2024",
            "Expense Distribution - 3/2024",
            "Financial Summary - 3/2024",
            "Expense Distribution - 4/2024",
            "Financial Summary - 4/2024",
            "Savings Goal",
        ]
    );

    Ok(())
}

#[test]
fn test_no_goal_page_without_goal() -> Result<()> {
    let report = build_report(&steady_ledger(), &ReportConfig::default())?;

    assert_eq!(report.pages().len(), 8);
    assert!(!render(&report)?.contains("Savings Goal"));

    Ok(())
}

#[test]
fn test_summary_page_text() -> Result<()> {
    let summaries = process_financial_data(&steady_ledger(), &ReportConfig::default())?;

    let mut out = Vec::new();
    Page::from(FinancialSummary::new(summaries[0].clone())).render(&mut out)?;

    assert_eq!(
        String::from_utf8(out)?,
        "Total Expenses: $100.00
Total Earnings (current month): $1,400.00
Expense-to-Income Ratio (current month): 7.14%

You are within budget and saving $1,300.00 after carryover.

You are saving this month,
with an expense-to-income ratio of 7.14%.

Updated budget for next month: $1,300.00

Recommendations:
Your budget has a surplus of $1300.00.
Consider saving 21.43% of your income for this month.
"
    );

    Ok(())
}

#[test]
fn test_outlier_month_text() -> Result<()> {
    let report = build_report(&steady_ledger(), &ReportConfig::default())?;
    let text = render(&report)?;

    assert!(text.contains("Page 8/8: Financial Summary - 4/2024"));
    assert!(text.contains("Updated budget for next month: $4,800.00"));
    assert!(text.contains(
        "Reduce Food expenses by 20.00%.\nIt seems this is an unusual spending amount for this month\n"
    ));

    Ok(())
}

#[test]
fn test_expense_distribution_page() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_transaction(tx(2024, 1, 1, "Salary", dec!(1000)));
    ledger.add_transaction(tx(2024, 1, 3, "Rent", dec!(-750)));
    ledger.add_transaction(tx(2024, 1, 5, "Food", dec!(-250)));
    let summaries = process_financial_data(&ledger, &ReportConfig::default())?;

    let mut out = Vec::new();
    ExpenseDistribution::new(&summaries[0]).render(&mut out)?;
    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("Food  {}", "#".repeat(10))));
    assert!(lines[0].ends_with("25.0%  $250.00"));
    assert!(lines[1].starts_with(&format!("Rent  {}", "#".repeat(30))));
    assert!(lines[1].ends_with("75.0%  $750.00"));

    Ok(())
}

#[test]
fn test_no_expenses_page() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_transaction(tx(2024, 6, 1, "Salary", dec!(500)));
    let report = build_report(&ledger, &ReportConfig::default())?;
    let text = render(&report)?;

    assert!(text.contains("Page 1/2: Expense Distribution - 6/2024"));
    assert!(text.contains("No Expenses"));
    assert!(text.contains("Expense-to-Income Ratio (current month): 0.00%"));

    Ok(())
}

#[test]
fn test_goal_pages() -> Result<()> {
    let ledger = steady_ledger();

    let on_track = render(&build_report(&ledger, &ReportConfig::new(Some(dec!(1000)), dec!(1000))?)?)?;
    assert!(on_track.contains(
        "Your average monthly income ($1,400.00)\nand expenses ($200.00)\n\
         are on track to meet your savings goal of $1,000.00."
    ));

    let unreachable = render(&build_report(&ledger, &ReportConfig::new(Some(dec!(5000)), dec!(1000))?)?)?;
    assert!(unreachable.contains("You don't earn enough to make this goal!"));

    let plan = render(&build_report(&ledger, &ReportConfig::new(Some(dec!(1300)), dec!(1000))?)?)?;
    assert!(plan.contains("you need to reduce expenses by a total of $100.00."));
    assert!(plan.contains("- Reduce $100.00 from Food."));

    Ok(())
}

#[test]
fn test_report_keeps_summaries() -> Result<()> {
    let ledger = steady_ledger();
    let report = build_report(&ledger, &ReportConfig::default())?;

    assert_eq!(report.summaries(), process_financial_data(&ledger, &ReportConfig::default())?.as_slice());
    assert_eq!(report.summaries().len() * 2, report.pages().len());

    Ok(())
}

#[test]
fn test_write_to_headers() -> Result<()> {
    let report = build_report(&steady_ledger(), &ReportConfig::default())?;
    let text = render(&report)?;
    let rule = "=".repeat(RULE_WIDTH);

    assert!(text.starts_with(&format!("{}\nPage 1/8: Expense Distribution - 1/2024\n{}\n", rule, rule)));
    assert_eq!(text.matches("Page ").count(), 8);

    Ok(())
}
