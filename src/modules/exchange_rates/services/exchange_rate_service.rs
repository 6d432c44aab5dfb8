use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{AppError, Currency, Result};

use super::rate_source::ExchangeRateSource;

/// Upper bound accepted for a manually entered rate
const MAX_EXCHANGE_RATE: i64 = 1_000_000;

/// Where a resolved rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateOrigin {
    Manual,
    Source,
    Default,
}

/// A rate ready to hand to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRate {
    pub rate: Decimal,
    pub origin: RateOrigin,
}

/// Resolves exchange rates before invoices are calculated
pub struct ExchangeRateService {
    source: Arc<dyn ExchangeRateSource>,
}

impl ExchangeRateService {
    pub fn new(source: Arc<dyn ExchangeRateSource>) -> Self {
        Self { source }
    }

    /// Pick the rate for an invoice.
    ///
    /// A positive manual rate wins. Otherwise the source is asked; a miss or
    /// a source failure falls back to 1 so the invoice still renders.
    pub async fn resolve(
        &self,
        manual: Option<Decimal>,
        from: Currency,
        to: Currency,
    ) -> ResolvedRate {
        if let Some(rate) = manual.filter(|r| *r > Decimal::ZERO) {
            return ResolvedRate {
                rate,
                origin: RateOrigin::Manual,
            };
        }

        match self.source.rate(from, to).await {
            Ok(Some(rate)) if rate > Decimal::ZERO => {
                info!(
                    source = %self.source.name(),
                    from = %from,
                    to = %to,
                    rate = %rate,
                    "Resolved exchange rate"
                );
                ResolvedRate {
                    rate,
                    origin: RateOrigin::Source,
                }
            }
            Ok(_) => {
                warn!(
                    source = %self.source.name(),
                    from = %from,
                    to = %to,
                    "No exchange rate available, using 1"
                );
                Self::default_rate()
            }
            Err(e) => {
                warn!(
                    source = %self.source.name(),
                    from = %from,
                    to = %to,
                    error = %e,
                    "Exchange rate lookup failed, using 1"
                );
                Self::default_rate()
            }
        }
    }

    /// Strict lookup for callers that must not silently fall back
    pub async fn lookup(&self, from: Currency, to: Currency) -> Result<Decimal> {
        self.source
            .rate(from, to)
            .await?
            .filter(|r| *r > Decimal::ZERO)
            .ok_or_else(|| AppError::exchange_rate(format!("No rate for {}/{}", from, to)))
    }

    fn default_rate() -> ResolvedRate {
        ResolvedRate {
            rate: Decimal::ONE,
            origin: RateOrigin::Default,
        }
    }
}

/// Convert an amount; identity when both currencies match
pub fn convert_amount(amount: Decimal, rate: Decimal, from: Currency, to: Currency) -> Decimal {
    if from == to {
        return amount;
    }
    amount.checked_mul(rate).unwrap_or(Decimal::ZERO)
}

/// Check a rate entered by hand
pub fn validate_exchange_rate(rate: Decimal) -> Result<()> {
    if rate <= Decimal::ZERO {
        return Err(AppError::validation("Exchange rate must be greater than 0"));
    }

    if rate > Decimal::from(MAX_EXCHANGE_RATE) {
        return Err(AppError::validation("Exchange rate seems too high"));
    }

    Ok(())
}

/// Implied rate from a pair of amounts; zero when `from_amount` is not positive
pub fn rate_from_amounts(from_amount: Decimal, to_amount: Decimal) -> Decimal {
    if from_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    to_amount.checked_div(from_amount).unwrap_or(Decimal::ZERO)
}
