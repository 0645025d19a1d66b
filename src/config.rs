use std::path::PathBuf;

use clap::Parser;
use getset::CopyGetters;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::data::LoadOptions;

pub const DEFAULT_SURPLUS_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("savings goal must not be negative, got {0}")]
    NegativeSavingsGoal(Decimal),
    #[error("surplus threshold must not be negative, got {0}")]
    NegativeSurplusThreshold(Decimal),
}

/// Builds a monthly financial report from a transaction ledger CSV
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// CSV file with `Date`, `Category` and `Amount` columns
    pub input: PathBuf,

    /// Where to write the report, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Monthly amount you want to save
    #[arg(long)]
    pub savings_goal: Option<Decimal>,

    /// Unspent amount above which a month counts as having a surplus
    #[arg(long, default_value_t = DEFAULT_SURPLUS_THRESHOLD)]
    pub surplus_threshold: Decimal,

    /// Skip malformed rows instead of rejecting the whole file
    #[arg(long)]
    pub skip_invalid: bool,

    /// Also write the monthly totals to this CSV file
    #[arg(long)]
    pub summary_csv: Option<PathBuf>,

    /// Currency of the ledger amounts; they are converted to USD at load time
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,

    /// Also write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_invalid: self.skip_invalid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ReportConfig {
    savings_goal: Option<Decimal>,
    surplus_threshold: Decimal,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            savings_goal: None,
            surplus_threshold: DEFAULT_SURPLUS_THRESHOLD,
        }
    }
}

impl ReportConfig {
    pub fn new(savings_goal: Option<Decimal>, surplus_threshold: Decimal) -> Result<ReportConfig, ConfigError> {
        if let Some(goal) = savings_goal.filter(|goal| *goal < Decimal::ZERO) {
            return Err(ConfigError::NegativeSavingsGoal(goal));
        }

        if surplus_threshold < Decimal::ZERO {
            return Err(ConfigError::NegativeSurplusThreshold(surplus_threshold));
        }

        Ok(ReportConfig {
            savings_goal,
            surplus_threshold,
        })
    }
}

impl TryFrom<&Args> for ReportConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        ReportConfig::new(args.savings_goal, args.surplus_threshold)
    }
}
