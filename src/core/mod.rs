//! Core business logic abstractions

pub mod balance;
pub mod clock;
pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod pagination;
pub mod rates;
pub mod transaction;

// Re-export main types for cleaner imports
pub use clock::{Clock, SystemClock};
pub use rates::{RateFetch, RateProvider, RateSource, RateTable};
pub use transaction::{Category, Transaction, TransactionKind};
