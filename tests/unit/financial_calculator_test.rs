// Property-based tests for the invoice financial summary
//
// - subtotal is quantity × rate
// - amount due is never negative, whatever was paid
// - hidden VAT contributes nothing
// - a locked total replaces the derived figure before conversion
// - component figures stay in source units while totals are converted

use invoicehub::invoices::models::{InvoiceFinancialInput, ResourceLine};
use invoicehub::invoices::FinancialCalculator;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn reference_invoice() -> InvoiceFinancialInput {
    InvoiceFinancialInput::new(10, 50).with_discount(10).with_vat(15)
}

proptest! {
    #[test]
    fn test_subtotal_is_quantity_times_rate(
        quantity in 0u32..100_000u32,
        rate_cents in 0u32..10_000_000u32
    ) {
        let rate = Decimal::new(rate_cents as i64, 2);
        let input = InvoiceFinancialInput::new(quantity, rate);

        let summary = FinancialCalculator::compute_summary(&input);

        prop_assert_eq!(summary.subtotal, Decimal::from(quantity) * rate);
    }

    #[test]
    fn test_amount_due_never_negative(
        quantity in 0u32..1_000u32,
        rate in 0u32..100_000u32,
        discount in 0u8..=100u8,
        vat in 0u8..=100u8,
        paid in 0u64..1_000_000_000u64,
        fx_millis in 1u32..100_000u32
    ) {
        let input = InvoiceFinancialInput::new(quantity, rate)
            .with_discount(discount as u32)
            .with_vat(vat as u32)
            .with_paid(Decimal::from(paid))
            .with_exchange_rate(Decimal::new(fx_millis as i64, 3));

        let summary = FinancialCalculator::compute_summary(&input);

        prop_assert!(summary.amount_due >= Decimal::ZERO, "amount due {} is negative", summary.amount_due);
    }

    #[test]
    fn test_hidden_vat_is_zero(
        quantity in 0u32..1_000u32,
        rate in 0u32..100_000u32,
        vat in 0u8..=100u8
    ) {
        let mut input = InvoiceFinancialInput::new(quantity, rate).with_vat(vat as u32);
        input.show_vat = false;

        let summary = FinancialCalculator::compute_summary(&input);

        prop_assert_eq!(summary.vat_amount, Decimal::ZERO);
        prop_assert_eq!(summary.total_with_vat, summary.total);
    }

    #[test]
    fn test_locked_total_ignores_line_figures(
        quantity in 0u32..1_000u32,
        rate in 0u32..100_000u32,
        discount in 0u8..=100u8,
        vat in 0u8..=100u8,
        locked in 0u32..10_000_000u32
    ) {
        let input = InvoiceFinancialInput::new(quantity, rate)
            .with_discount(discount as u32)
            .with_vat(vat as u32)
            .with_locked_total(locked);

        prop_assert_eq!(FinancialCalculator::final_total(&input), Decimal::from(locked));
        prop_assert_eq!(
            FinancialCalculator::compute_summary(&input).amount_due,
            Decimal::from(locked)
        );
    }

    #[test]
    fn test_calculation_is_deterministic(
        quantity in "[0-9]{1,4}",
        rate in "[0-9]{1,3}\\*[0-9]{1,2}"
    ) {
        let input = InvoiceFinancialInput::new(quantity.as_str(), rate.as_str());

        prop_assert_eq!(
            FinancialCalculator::compute_summary(&input),
            FinancialCalculator::compute_summary(&input)
        );
    }
}

#[test]
fn test_reference_invoice() {
    let summary = FinancialCalculator::compute_summary(&reference_invoice());

    assert_eq!(summary.subtotal, dec!(500));
    assert_eq!(summary.discount_amount, dec!(50));
    assert_eq!(summary.vat_amount, dec!(67.5));
    assert_eq!(summary.total, dec!(450));
    assert_eq!(summary.total_with_vat, dec!(517.5));
    assert_eq!(summary.amount_due, dec!(517.5));
}

#[test]
fn test_overpayment_clamps_amount_due() {
    let summary = FinancialCalculator::compute_summary(&reference_invoice().with_paid(600));

    assert_eq!(summary.amount_due, Decimal::ZERO);
    assert_eq!(summary.total_with_vat, dec!(517.5));
}

#[test]
fn test_resource_lines_add_to_pre_discount_total() {
    let input = InvoiceFinancialInput::new(1, 0)
        .with_resource(ResourceLine::new("Engineer", 10, 20))
        .with_resource(ResourceLine::new("Designer", 5, 40));

    let summary = FinancialCalculator::compute_summary(&input);

    assert_eq!(summary.resources_total, dec!(400));
    assert_eq!(summary.subtotal, Decimal::ZERO);
    assert_eq!(summary.total, dec!(400));
}

#[test]
fn test_discount_applies_to_resource_lines() {
    let input = InvoiceFinancialInput::new(2, 100)
        .with_resource(ResourceLine::new("Engineer", 10, 20))
        .with_discount(50);

    let summary = FinancialCalculator::compute_summary(&input);

    assert_eq!(summary.discount_amount, dec!(200));
    assert_eq!(summary.total, dec!(200));
}

#[test]
fn test_components_stay_in_source_units() {
    let input = reference_invoice().with_exchange_rate(dec!(15.2));

    let summary = FinancialCalculator::compute_summary(&input);

    assert_eq!(summary.subtotal, dec!(500));
    assert_eq!(summary.discount_amount, dec!(50));
    assert_eq!(summary.vat_amount, dec!(67.5));
    assert_eq!(summary.total, dec!(6840));
    assert_eq!(summary.total_with_vat, dec!(7866));
    assert_eq!(summary.amount_due, dec!(7866));
}

#[test]
fn test_paid_amount_is_in_target_units() {
    let input = reference_invoice().with_exchange_rate(2).with_paid(35);

    let summary = FinancialCalculator::compute_summary(&input);

    assert_eq!(summary.amount_due, dec!(1000));
}

#[test]
fn test_form_state_with_expressions_and_blanks() {
    let input = InvoiceFinancialInput::new("4*2.5", "40*25")
        .with_discount("")
        .with_vat("7.5+7.5")
        .with_paid("   ");

    let summary = FinancialCalculator::compute_summary(&input);

    assert_eq!(summary.subtotal, dec!(10000));
    assert_eq!(summary.discount_amount, Decimal::ZERO);
    assert_eq!(summary.vat_amount, dec!(1500));
    assert_eq!(summary.amount_due, dec!(11500));
}

#[test]
fn test_json_form_payload() {
    let input: InvoiceFinancialInput = serde_json::from_str(
        r#"{
            "qty": "10",
            "rate": 50,
            "discount": null,
            "vat": "15",
            "showVat": true,
            "paid": "abc",
            "resources": [{"type": "Engineer", "hours": "2", "rate": "100/4"}]
        }"#,
    )
    .unwrap();

    let summary = FinancialCalculator::compute_summary(&input);

    assert_eq!(summary.subtotal, dec!(500));
    assert_eq!(summary.resources_total, dec!(50));
    assert_eq!(summary.vat_amount, dec!(82.5));
    assert_eq!(summary.amount_due, dec!(632.5));
}
