use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{numeric_value, AppError, RawValue, Result};
use crate::modules::exchange_rates::services::validate_exchange_rate;

use super::ResourceLine;

fn default_true() -> bool {
    true
}

/// The numeric fields of an invoice that feed the financial summary.
///
/// Built from a stored invoice or from in-flight form state. The short
/// form field names (`qty`, `fx`, `lockTotal`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFinancialInput {
    #[serde(alias = "qty")]
    pub quantity: RawValue,

    pub rate: RawValue,

    #[serde(default, alias = "discount")]
    pub discount_percent: RawValue,

    #[serde(default, alias = "vat")]
    pub vat_percent: RawValue,

    /// When false the VAT amount is zero whatever `vat_percent` says
    #[serde(default = "default_true")]
    pub show_vat: bool,

    #[serde(default, alias = "paid")]
    pub paid_amount: RawValue,

    /// Source to display currency multiplier; missing or non-positive means 1
    #[serde(default, alias = "fx")]
    pub exchange_rate: RawValue,

    #[serde(default, alias = "resources")]
    pub resource_lines: Vec<ResourceLine>,

    #[serde(default, alias = "lockTotal")]
    pub total_is_locked: bool,

    /// Pre-conversion total used verbatim when `total_is_locked`
    #[serde(default, alias = "finalTotal")]
    pub locked_total_value: RawValue,

    /// Selects the VAT-inclusive total as the authoritative final total
    #[serde(default = "default_true", alias = "totalInclVat")]
    pub total_includes_vat: bool,
}

impl Default for InvoiceFinancialInput {
    fn default() -> Self {
        Self {
            quantity: RawValue::Missing,
            rate: RawValue::Missing,
            discount_percent: RawValue::Missing,
            vat_percent: RawValue::Missing,
            show_vat: true,
            paid_amount: RawValue::Missing,
            exchange_rate: RawValue::Missing,
            resource_lines: Vec::new(),
            total_is_locked: false,
            locked_total_value: RawValue::Missing,
            total_includes_vat: true,
        }
    }
}

impl InvoiceFinancialInput {
    pub fn new(quantity: impl Into<RawValue>, rate: impl Into<RawValue>) -> Self {
        Self {
            quantity: quantity.into(),
            rate: rate.into(),
            ..Self::default()
        }
    }

    pub fn with_discount(mut self, percent: impl Into<RawValue>) -> Self {
        self.discount_percent = percent.into();
        self
    }

    pub fn with_vat(mut self, percent: impl Into<RawValue>) -> Self {
        self.vat_percent = percent.into();
        self
    }

    pub fn with_paid(mut self, amount: impl Into<RawValue>) -> Self {
        self.paid_amount = amount.into();
        self
    }

    pub fn with_exchange_rate(mut self, rate: impl Into<RawValue>) -> Self {
        self.exchange_rate = rate.into();
        self
    }

    pub fn with_resource(mut self, line: ResourceLine) -> Self {
        self.resource_lines.push(line);
        self
    }

    pub fn with_locked_total(mut self, total: impl Into<RawValue>) -> Self {
        self.total_is_locked = true;
        self.locked_total_value = total.into();
        self
    }

    /// The input's own exchange rate, when it carries a positive one
    pub fn manual_exchange_rate(&self) -> Option<Decimal> {
        Some(numeric_value(&self.exchange_rate)).filter(|r| *r > Decimal::ZERO)
    }

    /// Request-level validation, run by handlers before calculating.
    ///
    /// The calculator itself accepts anything; this is where "rate must be
    /// non-negative" style rejections live.
    pub fn validate(&self) -> Result<()> {
        require("quantity", &self.quantity)?;
        require("rate", &self.rate)?;

        non_negative("quantity", &self.quantity)?;
        non_negative("rate", &self.rate)?;
        non_negative("paidAmount", &self.paid_amount)?;
        percentage("discountPercent", &self.discount_percent)?;
        percentage("vatPercent", &self.vat_percent)?;

        // A cleared form field means "no manual rate", same as absent
        if !is_blank(&self.exchange_rate) {
            validate_exchange_rate(numeric_value(&self.exchange_rate))?;
        }

        if self.total_is_locked {
            non_negative("lockedTotalValue", &self.locked_total_value)?;
        }

        for (index, line) in self.resource_lines.iter().enumerate() {
            line.validate(index)?;
        }

        Ok(())
    }
}

fn is_blank(value: &RawValue) -> bool {
    match value {
        RawValue::Missing => true,
        RawValue::Text(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn require(field: &str, value: &RawValue) -> Result<()> {
    if matches!(value, RawValue::Missing) {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn non_negative(field: &str, value: &RawValue) -> Result<()> {
    let amount = numeric_value(value);
    if amount < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got: {}",
            field, amount
        )));
    }
    Ok(())
}

fn percentage(field: &str, value: &RawValue) -> Result<()> {
    let percent = numeric_value(value);
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(AppError::validation(format!(
            "{} must be between 0 and 100, got: {}",
            field, percent
        )));
    }
    Ok(())
}

/// Derived figures for one invoice; recomputed on every read.
///
/// `subtotal`, `resources_total`, `discount_amount` and `vat_amount` are in
/// source-currency units. `total`, `total_with_vat` and `amount_due` have
/// the exchange rate applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub subtotal: Decimal,
    pub resources_total: Decimal,
    pub discount_amount: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub total_with_vat: Decimal,
    pub amount_due: Decimal,
}

impl FinancialSummary {
    /// The total shown on documents, chosen by the invoice's VAT flag
    pub fn displayed_total(&self, includes_vat: bool) -> Decimal {
        if includes_vat {
            self.total_with_vat
        } else {
            self.total
        }
    }
}
