use std::collections::BTreeMap;

use getset::{CopyGetters, Getters};
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};

use super::ledger::Ledger;
use super::{checked_sum, mean, percentage, AnalysisError, OrOverflow, Period};
use crate::config::ReportConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// The month left more than the surplus threshold unspent.
    Surplus {
        remaining: Decimal,
        savings_percentage: Decimal,
    },
    /// The category's spend this month is an outlier against its history.
    Reduce {
        category: String,
        reduction_percentage: Decimal,
    },
}

/// Mean and sample standard deviation of a category's monthly net totals.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct CategoryStats {
    #[getset(get = "pub")]
    category: String,
    #[getset(get_copy = "pub")]
    mean: Decimal,
    /// `None` with fewer than two monthly observations.
    #[getset(get_copy = "pub")]
    std_dev: Option<Decimal>,
}

impl CategoryStats {
    fn from_monthly_totals(category: String, totals: &[Decimal]) -> Result<Option<CategoryStats>, AnalysisError> {
        let Some(mean) = mean(totals, "category mean")? else {
            return Ok(None);
        };
        let std_dev = sample_std_dev(totals, mean)?;

        Ok(Some(CategoryStats {
            category,
            mean,
            std_dev,
        }))
    }

    /// Lower edge of the usual spending band. Expenses are negative, so an
    /// amount below this edge is an unusually large expense.
    pub fn lower_band(&self) -> Option<Decimal> {
        self.std_dev.and_then(|std_dev| self.mean.checked_sub(std_dev))
    }
}

fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Result<Option<Decimal>, AnalysisError> {
    if values.len() < 2 {
        return Ok(None);
    }

    let mut squares = Decimal::ZERO;
    for value in values {
        let square = value
            .checked_sub(mean)
            .and_then(|deviation| deviation.checked_mul(deviation))
            .and_then(|square| squares.checked_add(square));
        squares = square.or_overflow("category standard deviation")?;
    }

    let variance = squares / Decimal::from(values.len() - 1);

    Ok(variance.sqrt())
}

/// Statistics over the monthly net totals of every category in the ledger.
pub fn category_stats(ledger: &Ledger) -> Result<BTreeMap<String, CategoryStats>, AnalysisError> {
    let mut history: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
    for totals in ledger.monthly_category_totals()?.into_values() {
        for (category, amount) in totals {
            history.entry(category).or_default().push(amount);
        }
    }

    let mut stats = BTreeMap::new();
    for (category, totals) in history {
        if let Some(category_stats) = CategoryStats::from_monthly_totals(category.clone(), &totals)? {
            stats.insert(category, category_stats);
        }
    }

    Ok(stats)
}

pub fn calculate_savings_recommendations(
    ledger: &Ledger,
    period: Period,
    config: &ReportConfig,
) -> Result<Vec<Recommendation>, AnalysisError> {
    let totals = ledger.category_totals(period)?;

    let total_income = checked_sum(totals.values().filter(|amount| **amount > Decimal::ZERO), "monthly income")?;
    let total_expenses = checked_sum(totals.values().filter(|amount| **amount < Decimal::ZERO), "monthly expenses")?;
    let remaining = total_income.checked_add(total_expenses).or_overflow("remaining budget")?;

    let threshold = config.surplus_threshold();
    if remaining > threshold {
        let savings_percentage = percentage(remaining - threshold, total_income, "savings percentage")?;
        debug!("surplus in {}, remaining={}", period, remaining);

        return Ok(vec![Recommendation::Surplus {
            remaining,
            savings_percentage,
        }]);
    }

    let stats = category_stats(ledger)?;
    let mut recommendations = Vec::new();

    for (category, amount) in totals.into_iter().filter(|(_, amount)| *amount < Decimal::ZERO) {
        let Some(history) = stats.get(&category) else {
            continue;
        };

        if let Some(band) = history.lower_band().filter(|band| amount < *band) {
            let excess = band.checked_sub(amount).or_overflow("reduction percentage")?;
            let reduction_percentage = percentage(excess, -amount, "reduction percentage")?;
            debug!(
                "outlier in {}, category={}, amount={}, band={}",
                period, category, amount, band
            );

            recommendations.push(Recommendation::Reduce {
                category,
                reduction_percentage,
            });
        }
    }

    Ok(recommendations)
}
