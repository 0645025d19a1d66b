use std::io::{self, Write};

use anyhow::Result;
use enum_dispatch::enum_dispatch;
use log::info;

use crate::analysis::goal::{evaluate_savings_goal, GoalAssessment};
use crate::analysis::ledger::Ledger;
use crate::analysis::monthly::{process_financial_data, MonthlySummary};
use crate::config::ReportConfig;

pub mod pages;
pub mod texts;

#[cfg(test)]
mod report_tests;

use pages::{ExpenseDistribution, FinancialSummary, SavingsGoal};

const RULE_WIDTH: usize = 72;

#[enum_dispatch]
pub trait RenderPage {
    fn title(&self) -> String;

    /// Writes the page body. The page header is written by [`Report`].
    fn render(&self, out: &mut dyn Write) -> io::Result<()>;
}

#[enum_dispatch(RenderPage)]
pub enum Page {
    ExpenseDistribution,
    FinancialSummary,
    SavingsGoal,
}

#[derive(Default)]
pub struct Report {
    summaries: Vec<MonthlySummary>,
    pages: Vec<Page>,
}

impl Report {
    /// Two pages per month, expense distribution then financial summary,
    /// and the savings goal page last.
    pub fn new(summaries: Vec<MonthlySummary>, goal: Option<GoalAssessment>) -> Report {
        let mut pages: Vec<Page> = Vec::with_capacity(summaries.len() * 2 + 1);
        for summary in &summaries {
            pages.push(ExpenseDistribution::new(summary).into());
            pages.push(FinancialSummary::new(summary.clone()).into());
        }

        if let Some(assessment) = goal {
            pages.push(SavingsGoal::new(assessment).into());
        }

        Report { summaries, pages }
    }

    /// The monthly summaries the pages were rendered from.
    pub fn summaries(&self) -> &[MonthlySummary] {
        &self.summaries
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let count = self.pages.len();
        for (idx, page) in self.pages.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
            writeln!(out, "Page {}/{}: {}", idx + 1, count, page.title())?;
            writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
            page.render(&mut *out)?;
        }

        out.flush()
    }
}

pub fn build_report(ledger: &Ledger, config: &ReportConfig) -> Result<Report> {
    let summaries = process_financial_data(ledger, config)?;
    let goal = config
        .savings_goal()
        .map(|goal| evaluate_savings_goal(ledger, goal))
        .transpose()?;

    let report = Report::new(summaries, goal);
    info!("report has {} pages", report.pages().len());

    Ok(report)
}
