use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicehub::config::Config;
use invoicehub::exchange_rates::services::ExchangeRateService;
use invoicehub::invoices::{self, InvoiceService};
use invoicehub::middleware::{error_response, json_error_handler, ErrorHandler, RequestId};
use invoicehub::modules::health;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("invoicehub={},actix_web=info", config.app.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting InvoiceHub");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let defaults = config.invoicing.defaults();
    if config.invoicing.exchange_rates.is_empty() {
        tracing::warn!("No exchange rates configured; quotes will use a rate of 1");
    }

    let rates = Arc::new(ExchangeRateService::new(Arc::new(
        config.invoicing.exchange_rates.clone(),
    )));
    let invoice_service = Arc::new(InvoiceService::new(rates, defaults.clone()));

    tracing::info!(
        "Invoicing defaults: {} -> {}, numbers like {}",
        defaults.source_currency,
        defaults.target_currency,
        defaults.number_pattern
    );

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(invoice_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(health::controllers::configure)
            .configure(invoices::controllers::configure)
            .route("/", web::get().to(index))
            .default_service(web::to(not_found))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "InvoiceHub",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn not_found() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}
