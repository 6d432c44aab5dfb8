use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::core::{AppError, Currency, RawValue, Result};
use crate::modules::exchange_rates::services::ExchangeRateService;
use crate::modules::invoices::models::{
    FinancialSummary, InvoiceFinancialInput, InvoiceQuote, QuoteRequest, SummaryBlock,
};

use super::financial_calculator::FinancialCalculator;
use super::invoice_number::generate_invoice_number;
use super::schedule::Schedule;

/// ETA used when a quote has a start date but no duration
const DEFAULT_ETA_DAYS: u32 = 90;

/// Invoice-level defaults taken from configuration
#[derive(Debug, Clone)]
pub struct InvoiceDefaults {
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub number_pattern: String,
}

/// Service for invoice pricing
pub struct InvoiceService {
    rates: Arc<ExchangeRateService>,
    defaults: InvoiceDefaults,
}

impl InvoiceService {
    pub fn new(rates: Arc<ExchangeRateService>, defaults: InvoiceDefaults) -> Self {
        Self { rates, defaults }
    }

    /// Whether the default currency pair has a rate available
    pub async fn default_rate_available(&self) -> bool {
        self.rates
            .lookup(self.defaults.source_currency, self.defaults.target_currency)
            .await
            .is_ok()
    }

    /// Validate and summarise an invoice using its own exchange rate
    pub fn summarize(&self, input: &InvoiceFinancialInput) -> Result<FinancialSummary> {
        input.validate()?;
        Ok(FinancialCalculator::compute_summary(input))
    }

    /// Validate and lay out the document/email summary block
    pub fn summary_block(
        &self,
        input: &InvoiceFinancialInput,
        currency: Option<Currency>,
    ) -> Result<SummaryBlock> {
        let summary = self.summarize(input)?;
        Ok(SummaryBlock::from_summary(
            input,
            &summary,
            currency.unwrap_or(self.defaults.target_currency),
        ))
    }

    /// Price an invoice for creation.
    ///
    /// Resolves the exchange rate (the invoice's own positive rate first,
    /// then the rate source, then 1), computes the summary, and produces the
    /// converted final total to persist alongside a fresh invoice number.
    pub async fn quote(&self, request: QuoteRequest, today: NaiveDate) -> Result<InvoiceQuote> {
        request.invoice.validate()?;

        let source_currency = request
            .source_currency
            .unwrap_or(self.defaults.source_currency);
        let target_currency = request
            .target_currency
            .unwrap_or(self.defaults.target_currency);

        let exchange_rate = self
            .rates
            .resolve(
                request.invoice.manual_exchange_rate(),
                source_currency,
                target_currency,
            )
            .await;

        let mut invoice = request.invoice;
        invoice.exchange_rate = RawValue::Number(exchange_rate.rate);

        let summary = FinancialCalculator::compute_summary(&invoice);
        let final_total = FinancialCalculator::final_total(&invoice)
            .checked_mul(exchange_rate.rate)
            .ok_or_else(|| AppError::validation("Invoice total is out of range"))?;
        let summary_block = SummaryBlock::from_summary(&invoice, &summary, target_currency);
        let invoice_number = generate_invoice_number(&self.defaults.number_pattern, today);

        let delivery = request.start_date.map(|start| {
            Schedule::delivery_window(start, request.eta_days.unwrap_or(DEFAULT_ETA_DAYS))
        });

        info!(
            invoice_number = %invoice_number,
            from = %source_currency,
            to = %target_currency,
            rate = %exchange_rate.rate,
            final_total = %final_total,
            "Quoted invoice"
        );

        Ok(InvoiceQuote {
            invoice_number,
            source_currency,
            target_currency,
            exchange_rate,
            summary,
            final_total,
            summary_block,
            delivery,
        })
    }
}
