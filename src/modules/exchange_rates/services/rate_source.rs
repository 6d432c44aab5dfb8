use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::core::{AppError, Currency, Result};

/// Supplies mid-market rates for currency pairs.
///
/// Implementations may be backed by a rates table or a third-party API; the
/// calculator never calls one directly.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    /// Rate converting one unit of `from` into `to`; `Ok(None)` when unknown
    async fn rate(&self, from: Currency, to: Currency) -> Result<Option<Decimal>>;

    /// Source name, used in logs
    fn name(&self) -> &str;
}

/// Fixed rate table, loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    rates: HashMap<(Currency, Currency), Decimal>,
}

impl StaticRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.rates.insert((from, to), rate);
        self
    }

    /// Parse a table such as `USD:GHS=15.2, USD:EUR=0.92`
    pub fn parse(table: &str) -> Result<Self> {
        let mut source = Self::new();

        for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (pair, rate) = entry.split_once('=').ok_or_else(|| {
                AppError::Configuration(format!("Invalid exchange rate entry: {}", entry))
            })?;
            let (from, to) = pair.split_once(':').ok_or_else(|| {
                AppError::Configuration(format!("Invalid currency pair: {}", pair))
            })?;

            let from = Currency::from_str(from).map_err(AppError::Configuration)?;
            let to = Currency::from_str(to).map_err(AppError::Configuration)?;
            let rate = Decimal::from_str(rate.trim()).map_err(|_| {
                AppError::Configuration(format!("Invalid rate for {}: {}", pair, rate))
            })?;

            source.rates.insert((from, to), rate);
        }

        Ok(source)
    }

    pub fn rates(&self) -> impl Iterator<Item = (&(Currency, Currency), &Decimal)> {
        self.rates.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
impl ExchangeRateSource for StaticRateSource {
    async fn rate(&self, from: Currency, to: Currency) -> Result<Option<Decimal>> {
        if from == to {
            return Ok(Some(Decimal::ONE));
        }

        if let Some(rate) = self.rates.get(&(from, to)) {
            return Ok(Some(*rate));
        }

        // Inverse of the opposite pair
        Ok(self
            .rates
            .get(&(to, from))
            .filter(|r| !r.is_zero())
            .and_then(|r| Decimal::ONE.checked_div(*r)))
    }

    fn name(&self) -> &str {
        "static"
    }
}
