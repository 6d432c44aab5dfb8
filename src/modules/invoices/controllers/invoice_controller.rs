use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::core::Currency;
use crate::modules::invoices::models::{InvoiceFinancialInput, QuoteRequest, SummaryBlock};
use crate::modules::invoices::services::invoice_service::InvoiceService;

/// Request body for the summary block
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBlockRequest {
    pub invoice: InvoiceFinancialInput,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Summary rows plus the plain-text rendering used in notification emails
#[derive(Debug, Serialize)]
pub struct SummaryBlockResponse {
    #[serde(flatten)]
    pub block: SummaryBlock,
    pub text: String,
}

/// Compute the financial summary for invoice fields as submitted
/// POST /api/invoices/summary
pub async fn compute_summary(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<InvoiceFinancialInput>,
) -> Result<HttpResponse, AppError> {
    let summary = service.summarize(&request)?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Summary rows for document rendering, with the email text alongside
/// POST /api/invoices/summary-block
pub async fn summary_block(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<SummaryBlockRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let block = service.summary_block(&request.invoice, request.currency)?;
    let text = block.to_text();

    Ok(HttpResponse::Ok().json(SummaryBlockResponse { block, text }))
}

/// Price an invoice for creation: exchange rate, summary, final total, number
/// POST /api/invoices/quote
pub async fn quote_invoice(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let today = chrono::Utc::now().date_naive();
    let quote = service.quote(request.into_inner(), today).await?;

    Ok(HttpResponse::Created().json(quote))
}

/// Currency picker options
/// GET /api/currencies
pub async fn list_currencies() -> HttpResponse {
    HttpResponse::Ok().json(Currency::options())
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/invoices/summary", web::post().to(compute_summary))
            .route("/invoices/summary-block", web::post().to(summary_block))
            .route("/invoices/quote", web::post().to(quote_invoice))
            .route("/currencies", web::get().to(list_currencies)),
    );
}
