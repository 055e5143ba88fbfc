//! Exchange rate tables and the provider abstraction

use crate::core::currency::{CURRENCIES, PIVOT_CURRENCY};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

/// Static rates used whenever live rates cannot be obtained.
pub const FALLBACK_RATES: [(&str, f64); 6] = [
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("RUB", 92.5),
    ("JPY", 149.5),
    ("CNY", 7.24),
];

pub fn fallback_rate(code: &str) -> Option<f64> {
    FALLBACK_RATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, rate)| *rate)
}

#[derive(Debug, Error, PartialEq)]
pub enum RateTableError {
    #[error("Rate table is missing currency: {0}")]
    MissingCurrency(String),
    #[error("Invalid rate {rate} for currency: {code}")]
    InvalidRate { code: String, rate: f64 },
}

/// Currency code to rate, relative to the pivot currency (USD = 1.0).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<String, f64>);

impl RateTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn fallback() -> Self {
        FALLBACK_RATES.iter().copied().collect()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.0.insert(code.into(), rate);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that the pivot and every supported currency are present with a
    /// finite, positive rate.
    pub fn validate(&self) -> Result<(), RateTableError> {
        let required = CURRENCIES.iter().map(|c| c.code);
        for code in std::iter::once(PIVOT_CURRENCY).chain(required) {
            match self.get(code) {
                None => return Err(RateTableError::MissingCurrency(code.to_string())),
                Some(rate) if !rate.is_finite() || rate <= 0.0 => {
                    return Err(RateTableError::InvalidRate {
                        code: code.to_string(),
                        rate,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, r)| (c.into(), r)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Live => write!(f, "live"),
            RateSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of a rate fetch. Both variants always carry a usable table.
#[derive(Debug, Clone, PartialEq)]
pub enum RateFetch {
    Live(RateTable),
    Fallback(RateTable),
}

impl RateFetch {
    pub fn source(&self) -> RateSource {
        match self {
            RateFetch::Live(_) => RateSource::Live,
            RateFetch::Fallback(_) => RateSource::Fallback,
        }
    }

    pub fn rates(&self) -> &RateTable {
        match self {
            RateFetch::Live(rates) | RateFetch::Fallback(rates) => rates,
        }
    }

    pub fn into_rates(self) -> RateTable {
        match self {
            RateFetch::Live(rates) | RateFetch::Fallback(rates) => rates,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RateFetch::Fallback(_))
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest rates. Never fails: errors resolve to a fallback table.
    async fn fetch_rates(&self) -> RateFetch;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_table() {
        let table = RateTable::fallback();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("USD"), Some(1.0));
        assert_eq!(table.get("EUR"), Some(0.92));
        assert_eq!(table.get("GBP"), Some(0.79));
        assert_eq!(table.get("RUB"), Some(92.5));
        assert_eq!(table.get("JPY"), Some(149.5));
        assert_eq!(table.get("CNY"), Some(7.24));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_currency() {
        let table: RateTable = [("USD", 1.0), ("EUR", 0.5)].into_iter().collect();
        assert_eq!(
            table.validate(),
            Err(RateTableError::MissingCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn test_validate_non_positive_rate() {
        let mut table = RateTable::fallback();
        table.insert("JPY", 0.0);
        assert!(matches!(
            table.validate(),
            Err(RateTableError::InvalidRate { ref code, .. }) if code == "JPY"
        ));

        table.insert("JPY", f64::NAN);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let table: RateTable = [("USD", 1.0), ("EUR", 0.5)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"EUR":0.5,"USD":1.0}"#);
    }

    #[test]
    fn test_rate_fetch_accessors() {
        let fetch = RateFetch::Fallback(RateTable::fallback());
        assert!(fetch.is_fallback());
        assert_eq!(fetch.source(), RateSource::Fallback);
        assert_eq!(fetch.rates().get("USD"), Some(1.0));

        let live = RateFetch::Live(RateTable::new());
        assert_eq!(live.source().to_string(), "live");
        assert!(live.into_rates().is_empty());
    }
}
