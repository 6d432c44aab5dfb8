pub mod exchange_rate_service;
pub mod rate_source;

pub use exchange_rate_service::{
    convert_amount, rate_from_amounts, validate_exchange_rate, ExchangeRateService, RateOrigin,
    ResolvedRate,
};
pub use rate_source::{ExchangeRateSource, StaticRateSource};
