// Invoices module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{FinancialSummary, InvoiceFinancialInput, ResourceLine, SummaryBlock};
pub use services::{FinancialCalculator, InvoiceService};
