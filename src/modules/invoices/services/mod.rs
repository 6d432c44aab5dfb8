pub mod financial_calculator;
pub mod invoice_number;
pub mod invoice_service;
pub mod schedule;

pub use financial_calculator::FinancialCalculator;
pub use invoice_number::{generate_invoice_number, DEFAULT_INVOICE_NUMBER_PATTERN};
pub use invoice_service::{InvoiceDefaults, InvoiceService};
pub use schedule::Schedule;
