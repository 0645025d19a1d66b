use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::ledger::Ledger;
use crate::analysis::monthly::MonthlySummary;
use crate::analysis::Transaction;

pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Category", "Amount"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV must contain the following columns: {}", REQUIRED_COLUMNS.join(", "))]
    MissingColumns,
    #[error("line {line}: couldn't parse date '{value}'")]
    InvalidDate { line: u64, value: String },
    #[error("line {line}: couldn't parse amount '{value}'")]
    InvalidAmount { line: u64, value: String },
    #[error("line {line}: category is empty")]
    MissingCategory { line: u64 },
    #[error("file contains no transactions")]
    Empty,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Log and drop malformed rows instead of failing the load.
    pub skip_invalid: bool,
}

/// Raw row as it appears in the file. Fields are validated in
/// `TryFrom<TransactionRecord> for Transaction`.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(skip)]
    pub line: u64,
}

#[derive(Debug, Serialize)]
pub struct MonthlySummaryRecord {
    pub period: String,
    pub total_earnings: String,
    pub total_expenses: String,
    pub expense_income_ratio: String,
    pub budget_status: &'static str,
    pub carryover: String,
}

impl From<&MonthlySummary> for MonthlySummaryRecord {
    fn from(summary: &MonthlySummary) -> Self {
        MonthlySummaryRecord {
            period: summary.period().to_string(),
            total_earnings: two_places(summary.total_earnings()),
            total_expenses: two_places(summary.total_expenses()),
            expense_income_ratio: two_places(summary.expense_income_ratio()),
            budget_status: summary.budget_status().label(),
            carryover: two_places(summary.carryover()),
        }
    }
}

fn two_places(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = LoadError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let date = parse_date(&record.date).ok_or_else(|| LoadError::InvalidDate {
            line: record.line,
            value: record.date.clone(),
        })?;

        let amount = Decimal::from_str(&record.amount)
            .or_else(|_| Decimal::from_scientific(&record.amount))
            .map_err(|_| LoadError::InvalidAmount {
                line: record.line,
                value: record.amount.clone(),
            })?;

        if record.category.is_empty() {
            return Err(LoadError::MissingCategory { line: record.line });
        }

        Ok(Transaction::new(date, record.category, amount))
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|datetime| datetime.date_naive()))
}

pub fn load_csv(file_path: impl AsRef<Path>, options: LoadOptions) -> Result<Ledger, LoadError> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path).map_err(|err| {
        warn!("failed to open '{}', err={}", file_path.display(), err);
        err
    })?;

    read_transactions(file, options)
}

pub fn read_transactions<R: Read>(reader: R, options: LoadOptions) -> Result<Ledger, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if !REQUIRED_COLUMNS
        .iter()
        .all(|column| headers.iter().any(|header| header == *column))
    {
        return Err(LoadError::MissingColumns);
    }

    let mut ledger = Ledger::new();
    let mut skipped = 0usize;

    for result in csv_reader.records() {
        let transaction = result.map_err(LoadError::from).and_then(|row| {
            let mut record: TransactionRecord = row.deserialize(Some(&headers))?;
            record.line = row.position().map_or(0, |position| position.line());
            Transaction::try_from(record)
        });

        match transaction {
            Ok(transaction) => ledger.add_transaction(transaction),
            Err(err) if options.skip_invalid => {
                debug!("skipping invalid record, err={}", err);
                skipped += 1;
            },
            Err(err) => return Err(err),
        }
    }

    if skipped > 0 {
        warn!("skipped {} invalid records", skipped);
    }

    if ledger.is_empty() {
        return Err(LoadError::Empty);
    }

    info!("Data loaded successfully, {} transactions", ledger.len());

    Ok(ledger)
}

pub fn export_summaries_csv<W: Write>(summaries: &[MonthlySummary], writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for summary in summaries {
        let record: MonthlySummaryRecord = summary.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}
