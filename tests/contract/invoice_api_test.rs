// Contract tests for the invoice pricing endpoints
//
// Validates status codes and JSON response shapes for:
// - POST /api/invoices/summary
// - POST /api/invoices/summary-block (rows plus email text)
// - POST /api/invoices/quote
// - GET  /api/currencies
// - GET  /ready
//
// Decimal figures are serialized as JSON strings.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::{test, web, App};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use invoicehub::core::Currency;
use invoicehub::exchange_rates::{ExchangeRateService, StaticRateSource};
use invoicehub::invoices::models::FinancialSummary;
use invoicehub::invoices::services::{InvoiceDefaults, DEFAULT_INVOICE_NUMBER_PATTERN};
use invoicehub::invoices::{self, InvoiceService};
use invoicehub::middleware::json_error_handler;
use invoicehub::modules::health;

fn invoice_service() -> Arc<InvoiceService> {
    let source = StaticRateSource::new().with_rate(Currency::USD, Currency::GHS, dec!(15.2));
    Arc::new(InvoiceService::new(
        Arc::new(ExchangeRateService::new(Arc::new(source))),
        InvoiceDefaults {
            source_currency: Currency::USD,
            target_currency: Currency::GHS,
            number_pattern: DEFAULT_INVOICE_NUMBER_PATTERN.to_string(),
        },
    ))
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(invoice_service()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(health::controllers::configure)
                .configure(invoices::controllers::configure),
        )
        .await
    };
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

fn reference_invoice() -> Value {
    json!({
        "quantity": 10,
        "rate": "50",
        "discountPercent": 10,
        "vatPercent": "15",
        "showVat": true,
        "paidAmount": 0
    })
}

#[actix_web::test]
async fn test_summary_returns_all_figures() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary")
        .set_json(reference_invoice())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    for field in [
        "subtotal",
        "resourcesTotal",
        "discountAmount",
        "vatAmount",
        "total",
        "totalWithVat",
        "amountDue",
    ] {
        assert!(body.get(field).is_some(), "{} is required", field);
    }

    let summary: FinancialSummary = serde_json::from_value(body).unwrap();
    assert_eq!(summary.subtotal, dec!(500));
    assert_eq!(summary.discount_amount, dec!(50));
    assert_eq!(summary.vat_amount, dec!(67.5));
    assert_eq!(summary.total_with_vat, dec!(517.5));
    assert_eq!(summary.amount_due, dec!(517.5));
}

#[actix_web::test]
async fn test_summary_accepts_form_shorthand() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary")
        .set_json(json!({
            "qty": "2*5",
            "rate": "40+10",
            "vat": "",
            "paid": "100",
            "fx": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let summary: FinancialSummary = test::read_body_json(resp).await;
    assert_eq!(summary.subtotal, dec!(500));
    assert_eq!(summary.total, dec!(1000));
    assert_eq!(summary.amount_due, dec!(900));
}

#[actix_web::test]
async fn test_summary_rejects_negative_rate() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary")
        .set_json(json!({"quantity": 1, "rate": -5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"].as_str().unwrap().contains("rate"));
}

#[actix_web::test]
async fn test_summary_rejects_missing_quantity() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary")
        .set_json(json!({"rate": 50}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"].is_string());
}

#[actix_web::test]
async fn test_summary_rejects_out_of_range_vat() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary")
        .set_json(json!({"quantity": 1, "rate": 10, "vatPercent": 150}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_summary_block_rows() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary-block")
        .set_json(json!({"invoice": reference_invoice(), "currency": "USD"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["currency"], "USD");

    let rows = body["rows"].as_array().unwrap();
    let kinds: Vec<&str> = rows.iter().map(|r| r["kind"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec!["subtotal", "discount", "vat", "total", "paid", "amount_due"]
    );

    assert_eq!(rows[0]["formatted"], "$ 500.00");
    assert_eq!(rows[1]["formatted"], "-$ 50.00");
    assert_eq!(decimal(&rows[5]["amount"]), dec!(517.5));

    // Email body rendering of the same rows
    let text = body["text"].as_str().unwrap();
    assert_eq!(text.lines().count(), rows.len());
    assert!(text.starts_with("Subtotal: $ 500.00"));
    assert!(text.ends_with("Amount Due: $ 517.50"));
}

#[actix_web::test]
async fn test_summary_accepts_blank_exchange_rate() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/summary")
        .set_json(json!({"qty": 1, "rate": 10, "fx": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let summary: FinancialSummary = test::read_body_json(resp).await;
    assert_eq!(summary.total, dec!(10));
    assert_eq!(summary.amount_due, dec!(10));
}

#[actix_web::test]
async fn test_quote_with_blank_exchange_rate_uses_source() {
    let app = app!();

    let mut invoice = reference_invoice();
    invoice["exchangeRate"] = json!("");

    let req = test::TestRequest::post()
        .uri("/api/invoices/quote")
        .set_json(json!({"invoice": invoice}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["exchangeRate"]["origin"], "source");
    assert_eq!(decimal(&body["finalTotal"]), dec!(7866));
}

#[actix_web::test]
async fn test_quote_converts_and_numbers_invoice() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/quote")
        .set_json(json!({
            "invoice": reference_invoice(),
            "startDate": "2024-01-05",
            "etaDays": 14
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["invoiceNumber"].as_str().unwrap().starts_with("INV-"));
    assert_eq!(body["sourceCurrency"], "USD");
    assert_eq!(body["targetCurrency"], "GHS");
    assert_eq!(body["exchangeRate"]["origin"], "source");
    assert_eq!(decimal(&body["exchangeRate"]["rate"]), dec!(15.2));
    assert_eq!(decimal(&body["finalTotal"]), dec!(7866));

    // Components stay in source units, totals are converted
    assert_eq!(decimal(&body["summary"]["subtotal"]), dec!(500));
    assert_eq!(decimal(&body["summary"]["totalWithVat"]), dec!(7866));

    assert_eq!(body["summaryBlock"]["currency"], "GHS");
    assert_eq!(body["delivery"]["etaDate"], "2024-01-19");
}

#[actix_web::test]
async fn test_quote_prefers_invoice_exchange_rate() {
    let app = app!();

    let mut invoice = reference_invoice();
    invoice["exchangeRate"] = json!("2");

    let req = test::TestRequest::post()
        .uri("/api/invoices/quote")
        .set_json(json!({"invoice": invoice}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["exchangeRate"]["origin"], "manual");
    assert_eq!(decimal(&body["finalTotal"]), dec!(1035));
    assert!(body.get("delivery").is_none());
}

#[actix_web::test]
async fn test_quote_falls_back_to_unit_rate() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/invoices/quote")
        .set_json(json!({"invoice": reference_invoice(), "targetCurrency": "KES"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["exchangeRate"]["origin"], "default");
    assert_eq!(decimal(&body["finalTotal"]), dec!(517.5));
}

#[actix_web::test]
async fn test_list_currencies() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/currencies").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let currencies = body.as_array().unwrap();
    assert_eq!(currencies.len(), Currency::ALL.len());
    assert!(currencies.iter().any(|c| c["value"] == "GHS"));
}

#[actix_web::test]
async fn test_readiness_reports_exchange_rates() {
    let app = app!();

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["exchange_rates"], true);
}
