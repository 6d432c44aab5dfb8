pub mod exchange_rates;
pub mod health;
pub mod invoices;
