// Footer block shared by the HTML/PDF document and the notification email.
// Both used to recompute figures inline; building them from one
// FinancialSummary keeps the two in agreement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{numeric_value, Currency};

use super::{FinancialSummary, InvoiceFinancialInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryRowKind {
    Subtotal,
    Discount,
    Vat,
    Total,
    Paid,
    AmountDue,
}

impl SummaryRowKind {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryRowKind::Subtotal => "Subtotal",
            SummaryRowKind::Discount => "Discount",
            SummaryRowKind::Vat => "VAT",
            SummaryRowKind::Total => "Total",
            SummaryRowKind::Paid => "Paid",
            SummaryRowKind::AmountDue => "Amount Due",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub kind: SummaryRowKind,
    pub label: String,
    pub amount: Decimal,
    pub formatted: String,
    /// Rendered bold in documents
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBlock {
    pub currency: Currency,
    pub rows: Vec<SummaryRow>,
}

impl SummaryBlock {
    /// Lay out the summary rows in document order.
    ///
    /// Discount appears only when non-zero and VAT only when shown. The
    /// total row follows the invoice's VAT flag.
    pub fn from_summary(
        input: &InvoiceFinancialInput,
        summary: &FinancialSummary,
        currency: Currency,
    ) -> Self {
        let mut block = Self {
            currency,
            rows: Vec::with_capacity(6),
        };

        let lines_total = summary
            .subtotal
            .checked_add(summary.resources_total)
            .unwrap_or(Decimal::ZERO);
        block.push(SummaryRowKind::Subtotal, lines_total, true);

        if !summary.discount_amount.is_zero() {
            block.push(SummaryRowKind::Discount, -summary.discount_amount, false);
        }

        if input.show_vat {
            block.push(SummaryRowKind::Vat, summary.vat_amount, false);
        }

        block.push(
            SummaryRowKind::Total,
            summary.displayed_total(input.total_includes_vat),
            true,
        );
        block.push(SummaryRowKind::Paid, numeric_value(&input.paid_amount), false);
        block.push(SummaryRowKind::AmountDue, summary.amount_due, true);

        block
    }

    pub fn row(&self, kind: SummaryRowKind) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.kind == kind)
    }

    /// Plain-text rendering for email bodies
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|r| format!("{}: {}", r.label, r.formatted))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, kind: SummaryRowKind, amount: Decimal, emphasized: bool) {
        let formatted = if amount < Decimal::ZERO {
            format!("-{}", self.currency.format_with_symbol(amount.abs()))
        } else {
            self.currency.format_with_symbol(amount)
        };

        self.rows.push(SummaryRow {
            kind,
            label: kind.label().to_string(),
            amount,
            formatted,
            emphasized,
        });
    }
}
