pub mod caching;
pub mod exchange_rate_api;

pub use caching::{DEFAULT_RATE_TTL, RateCache, RateSnapshot};
pub use exchange_rate_api::ExchangeRateApiProvider;
