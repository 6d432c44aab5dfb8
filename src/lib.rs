//! InvoiceHub invoice pricing library
//!
//! Financial calculation, exchange-rate resolution and summary layout for
//! invoices, served over HTTP by the `invoicehub` binary.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{numeric_value, AppError, Currency, RawValue, Result};
pub use modules::exchange_rates;
pub use modules::invoices;
