use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;
use crate::modules::exchange_rates::services::ResolvedRate;

use super::{FinancialSummary, InvoiceFinancialInput, SummaryBlock};

/// Request body for pricing an invoice before it is saved
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub invoice: InvoiceFinancialInput,

    /// Defaults to the configured source currency
    #[serde(default)]
    pub source_currency: Option<Currency>,

    /// Defaults to the configured target currency
    #[serde(default)]
    pub target_currency: Option<Currency>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub eta_days: Option<u32>,
}

/// Delivery window printed on the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryWindow {
    pub start_date: NaiveDate,
    pub eta_date: NaiveDate,
    pub range: String,
    pub description: String,
}

/// Everything an invoice needs from the calculator at creation time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQuote {
    pub invoice_number: String,
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub exchange_rate: ResolvedRate,
    pub summary: FinancialSummary,
    /// Converted authoritative total, the value persisted as `finalTotal`
    pub final_total: Decimal,
    pub summary_block: SummaryBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryWindow>,
}
