//! Conversion of ledger amounts to USD.
//!
//! Rates come from a [`RateProvider`]. [`FrankfurterClient`] fetches the latest
//! rate from the Frankfurter exchange rate API.

use std::collections::HashMap;

use log::{debug, info};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::analysis::ledger::Ledger;
use crate::analysis::Transaction;

pub const TARGET_CURRENCY: &str = "USD";
pub const FRANKFURTER_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("'{0}' is not a 3-letter currency code")]
    InvalidCode(String),
    #[error("no USD rate available for {0}")]
    MissingRate(String),
    #[error("converting {amount} {currency} to USD overflows")]
    Overflow { amount: Decimal, currency: String },
}

pub trait RateProvider {
    /// How many USD one unit of `currency` buys. `currency` is an upper-case
    /// ISO 4217 code.
    fn rate_to_usd(&self, currency: &str) -> Result<Decimal, CurrencyError>;
}

/// Upper-cases `code` and checks that it is three ASCII letters.
pub fn normalize_code(code: &str) -> Result<String, CurrencyError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(CurrencyError::InvalidCode(code.to_string()));
    }

    Ok(code.to_ascii_uppercase())
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

pub struct FrankfurterClient {
    http_client: Client,
    base_url: String,
}

impl Default for FrankfurterClient {
    fn default() -> Self {
        FrankfurterClient::new(FRANKFURTER_URL)
    }
}

impl FrankfurterClient {
    pub fn new(base_url: impl Into<String>) -> FrankfurterClient {
        FrankfurterClient {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self, currency: &str) -> String {
        format!("{}/latest?base={}&symbols={}", self.base_url, currency, TARGET_CURRENCY)
    }
}

impl RateProvider for FrankfurterClient {
    fn rate_to_usd(&self, currency: &str) -> Result<Decimal, CurrencyError> {
        let url = self.latest_url(currency);
        debug!("fetching exchange rate, url={}", url);

        let latest: LatestRates = self.http_client.get(&url).send()?.error_for_status()?.json()?;

        latest
            .rates
            .get(TARGET_CURRENCY)
            .and_then(|rate| Decimal::try_from(*rate).ok())
            .ok_or_else(|| CurrencyError::MissingRate(currency.to_string()))
    }
}

/// Returns a copy of `ledger` with every amount converted from `currency` to
/// USD and rounded to cents.
pub fn convert_ledger(ledger: &Ledger, currency: &str, rates: &dyn RateProvider) -> Result<Ledger, CurrencyError> {
    let currency = normalize_code(currency)?;
    if currency == TARGET_CURRENCY {
        return Ok(ledger.transactions_iter().cloned().collect());
    }

    let rate = rates.rate_to_usd(&currency)?;
    info!("converting {} transactions from {} at {}", ledger.len(), currency, rate);

    ledger
        .transactions_iter()
        .map(|tx| -> Result<Transaction, CurrencyError> {
            let amount = tx.amount.checked_mul(rate).ok_or_else(|| CurrencyError::Overflow {
                amount: tx.amount,
                currency: currency.clone(),
            })?;

            Ok(Transaction::new(tx.date, tx.category.clone(), amount.round_dp(2)))
        })
        .collect()
}
