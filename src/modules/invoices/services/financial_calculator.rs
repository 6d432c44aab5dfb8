use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::numeric_value;
use crate::modules::invoices::models::{FinancialSummary, InvoiceFinancialInput, ResourceLine};

/// Computes invoice financial summaries.
///
/// Shared by invoice creation, document rendering and email composition so
/// that all three show the same figures. Stateless and infallible: every
/// raw field goes through [`numeric_value`], and arithmetic overflow
/// degrades to zero the same way malformed input does.
pub struct FinancialCalculator;

impl FinancialCalculator {
    /// Derive the financial summary for an invoice.
    ///
    /// The exchange rate is taken from the input as-is; callers that need a
    /// looked-up rate resolve it first (see `ExchangeRateService::resolve`).
    /// A non-positive rate is treated as 1.
    pub fn compute_summary(input: &InvoiceFinancialInput) -> FinancialSummary {
        Self::evaluate(input).0
    }

    /// The authoritative pre-conversion total: the locked value when the
    /// total is locked, otherwise the VAT-inclusive or exclusive total.
    pub fn final_total(input: &InvoiceFinancialInput) -> Decimal {
        Self::evaluate(input).1
    }

    fn evaluate(input: &InvoiceFinancialInput) -> (FinancialSummary, Decimal) {
        let quantity = numeric_value(&input.quantity);
        let rate = numeric_value(&input.rate);
        let discount_percent = numeric_value(&input.discount_percent);
        let vat_percent = numeric_value(&input.vat_percent);
        let paid = numeric_value(&input.paid_amount);
        let fx = match numeric_value(&input.exchange_rate) {
            fx if fx > Decimal::ZERO => fx,
            _ => Decimal::ONE,
        };

        let subtotal = Self::subtotal(quantity, rate);
        let resources_total = Self::resources_total(&input.resource_lines);
        let pre_discount_total = add(subtotal, resources_total);

        let discount_amount = Self::discount_amount(pre_discount_total, discount_percent);
        let after_discount = sub(pre_discount_total, discount_amount);

        let vat_amount = if input.show_vat {
            Self::vat_amount(after_discount, vat_percent)
        } else {
            Decimal::ZERO
        };

        let total_excl_vat = after_discount;
        let total_incl_vat = add(after_discount, vat_amount);

        let base_final_total = if input.total_is_locked {
            numeric_value(&input.locked_total_value)
        } else if input.total_includes_vat {
            total_incl_vat
        } else {
            total_excl_vat
        };

        let converted_final_total = mul(base_final_total, fx);
        let amount_due = sub(converted_final_total, paid).max(Decimal::ZERO);

        tracing::debug!(
            %subtotal,
            %resources_total,
            %discount_amount,
            %vat_amount,
            %fx,
            %amount_due,
            locked = input.total_is_locked,
            "Computed financial summary"
        );

        let summary = FinancialSummary {
            subtotal,
            resources_total,
            discount_amount,
            vat_amount,
            total: mul(total_excl_vat, fx),
            total_with_vat: mul(total_incl_vat, fx),
            amount_due,
        };

        (summary, base_final_total)
    }

    /// quantity × rate
    pub fn subtotal(quantity: Decimal, rate: Decimal) -> Decimal {
        mul(quantity, rate)
    }

    /// Σ hours × rate over the resource lines
    pub fn resources_total(lines: &[ResourceLine]) -> Decimal {
        lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| add(sum, line.amount()))
    }

    pub fn discount_amount(amount: Decimal, discount_percent: Decimal) -> Decimal {
        mul(amount, discount_percent / Decimal::ONE_HUNDRED)
    }

    pub fn vat_amount(amount: Decimal, vat_percent: Decimal) -> Decimal {
        mul(amount, vat_percent / Decimal::ONE_HUNDRED)
    }

    /// Gross up a VAT-exclusive amount: amount × (1 + pct/100)
    pub fn tax_inclusive(amount: Decimal, vat_percent: Decimal) -> Decimal {
        mul(amount, add(Decimal::ONE, vat_percent / Decimal::ONE_HUNDRED))
    }

    /// Strip VAT from a VAT-inclusive amount: amount / (1 + pct/100)
    pub fn tax_exclusive(amount: Decimal, vat_percent: Decimal) -> Decimal {
        let divisor = add(Decimal::ONE, vat_percent / Decimal::ONE_HUNDRED);
        if divisor.is_zero() {
            return Decimal::ZERO;
        }
        amount.checked_div(divisor).unwrap_or(Decimal::ZERO)
    }

    /// part as a percentage of whole; zero when whole is zero.
    /// Used for "paid so far" progress figures on invoice lists.
    pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
        if whole.is_zero() {
            return Decimal::ZERO;
        }
        part.checked_div(whole)
            .map(|ratio| mul(ratio, Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Round half away from zero, like the dashboard's display rounding
    pub fn round_to(value: Decimal, decimals: u32) -> Decimal {
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Weighted mean for blended rates; zero on mismatched, empty or zero-weight input.
    /// Resource lines billed at different hourly rates average through this.
    pub fn weighted_average(values: &[Decimal], weights: &[Decimal]) -> Decimal {
        if values.len() != weights.len() || values.is_empty() {
            return Decimal::ZERO;
        }

        let total_weight = weights.iter().fold(Decimal::ZERO, |sum, w| add(sum, *w));
        if total_weight.is_zero() {
            return Decimal::ZERO;
        }

        let weighted_sum = values
            .iter()
            .zip(weights)
            .fold(Decimal::ZERO, |sum, (v, w)| add(sum, mul(*v, *w)));

        weighted_sum.checked_div(total_weight).unwrap_or(Decimal::ZERO)
    }

    /// principal × (1 + rate/100)^periods, used for late payment penalties
    /// on overdue balances (one period per month overdue)
    pub fn compound_interest(principal: Decimal, rate_percent: Decimal, periods: u32) -> Decimal {
        let factor = add(Decimal::ONE, rate_percent / Decimal::ONE_HUNDRED);
        (0..periods).fold(principal, |acc, _| mul(acc, factor))
    }
}

fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(Decimal::ZERO)
}

fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}
