// Exchange rates module

pub mod services;

pub use services::{ExchangeRateService, ExchangeRateSource, StaticRateSource};
