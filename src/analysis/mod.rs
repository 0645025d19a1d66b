use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

pub mod goal;
pub mod ledger;
pub mod monthly;
pub mod recommendations;


#[derive(Debug, PartialEq, Error)]
pub enum AnalysisError {
    #[error("ledger has no transactions")]
    EmptyLedger,
    #[error("savings goal must not be negative, got {0}")]
    NegativeGoal(Decimal),
    #[error("amounts are too large to compute the {0}")]
    Overflow(&'static str),
}

/// Turns the `None` of a `checked_*` Decimal operation into an overflow error.
pub(crate) trait OrOverflow {
    fn or_overflow(self, what: &'static str) -> Result<Decimal, AnalysisError>;
}

impl OrOverflow for Option<Decimal> {
    fn or_overflow(self, what: &'static str) -> Result<Decimal, AnalysisError> {
        self.ok_or(AnalysisError::Overflow(what))
    }
}

/// A calendar month. Orders by year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Period {
        Period { year, month }
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Period::new(date.year(), date.month())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: String,
    /// Positive amounts are income, negative amounts are expenses.
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Decimal) -> Transaction {
        Transaction {
            date,
            category: category.into(),
            amount,
        }
    }

    pub fn period(&self) -> Period {
        self.date.into()
    }
}

pub(crate) fn checked_sum<'a>(
    values: impl IntoIterator<Item = &'a Decimal>,
    what: &'static str,
) -> Result<Decimal, AnalysisError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value).or_overflow(what))
}

/// `part / whole * 100`.
pub(crate) fn percentage(part: Decimal, whole: Decimal, what: &'static str) -> Result<Decimal, AnalysisError> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .or_overflow(what)
}

/// Mean of `values`, `None` when empty.
pub(crate) fn mean(values: &[Decimal], what: &'static str) -> Result<Option<Decimal>, AnalysisError> {
    if values.is_empty() {
        return Ok(None);
    }

    let total = checked_sum(values, what)?;
    total.checked_div(Decimal::from(values.len())).or_overflow(what).map(Some)
}
