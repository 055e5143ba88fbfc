use crate::core::currency::{CURRENCIES, PIVOT_CURRENCY};
use crate::core::rates::{RateFetch, RateProvider, RateTable, fallback_rate};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

// Rates provider backed by the "latest rates" endpoint of exchangerate-api.com
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_latest(&self) -> Result<LatestRatesResponse> {
        let url = format!("{}/v4/latest/{}", self.base_url, PIVOT_CURRENCY);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("expense-tracker/1.0")
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response.text().await?;
        debug!(response = %text, "Received exchange rate response");

        serde_json::from_str(&text).map_err(|e| anyhow!("Failed to parse JSON response: {}", e))
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    // Values are kept loose so one bad entry only costs that currency.
    rates: HashMap<String, serde_json::Value>,
}

impl LatestRatesResponse {
    fn into_rate_table(self) -> RateTable {
        let mut table = RateTable::new();
        table.insert(PIVOT_CURRENCY, 1.0);

        for currency in CURRENCIES.iter().filter(|c| c.code != PIVOT_CURRENCY) {
            let live = self
                .rates
                .get(currency.code)
                .and_then(serde_json::Value::as_f64)
                .filter(|rate| rate.is_finite() && *rate > 0.0);

            let rate = match (live, fallback_rate(currency.code)) {
                (Some(rate), _) => rate,
                (None, Some(fallback)) => {
                    warn!(
                        currency = currency.code,
                        fallback, "Missing or invalid rate in response, using fallback"
                    );
                    fallback
                }
                (None, None) => continue,
            };
            table.insert(currency.code, rate);
        }

        table
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn fetch_rates(&self) -> RateFetch {
        match self.fetch_latest().await {
            Ok(response) => {
                let rates = response.into_rate_table();
                debug!(?rates, "Processed exchange rates");
                RateFetch::Live(rates)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch exchange rates, using fallback");
                RateFetch::Fallback(RateTable::fallback())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LATEST_PATH: &str = "/v4/latest/USD";

    pub async fn create_mock_server(status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LATEST_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "base": "USD",
            "rates": {
                "USD": 1,
                "EUR": 0.91,
                "GBP": 0.78,
                "RUB": 90.1,
                "JPY": 150.2,
                "CNY": 7.1,
                "CHF": 0.88
            }
        }"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        assert!(!result.is_fallback());
        let rates = result.rates();
        assert_eq!(rates.len(), 6);
        assert_eq!(rates.get("USD"), Some(1.0));
        assert_eq!(rates.get("EUR"), Some(0.91));
        assert_eq!(rates.get("GBP"), Some(0.78));
        assert_eq!(rates.get("RUB"), Some(90.1));
        assert_eq!(rates.get("JPY"), Some(150.2));
        assert_eq!(rates.get("CNY"), Some(7.1));
        // Codes we do not support are dropped
        assert!(rates.get("CHF").is_none());
    }

    #[tokio::test]
    async fn test_missing_and_invalid_entries_use_fallback_values() {
        let mock_response = r#"{
            "rates": {
                "USD": 1,
                "EUR": 0.91,
                "GBP": "0.78",
                "JPY": 0,
                "CNY": -3
            }
        }"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        assert!(!result.is_fallback());
        let rates = result.rates();
        assert_eq!(rates.get("EUR"), Some(0.91));
        assert_eq!(rates.get("GBP"), Some(0.79));
        assert_eq!(rates.get("RUB"), Some(92.5));
        assert_eq!(rates.get("JPY"), Some(149.5));
        assert_eq!(rates.get("CNY"), Some(7.24));
        assert!(rates.validate().is_ok());
    }

    #[tokio::test]
    async fn test_pivot_is_always_one() {
        let mock_response = r#"{"rates": {"USD": 2.0, "EUR": 0.9}}"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;
        assert_eq!(result.rates().get("USD"), Some(1.0));
    }

    #[tokio::test]
    async fn test_api_error_response_falls_back() {
        let mock_server = create_mock_server(500, "").await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        assert!(result.is_fallback());
        assert_eq!(result.rates(), &RateTable::fallback());
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        // "rate" instead of "rates"
        let mock_response = r#"{"rate": {"EUR": 0.5}}"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        assert!(result.is_fallback());
        assert_eq!(result.into_rates(), RateTable::fallback());
    }

    #[tokio::test]
    async fn test_unreachable_api_falls_back() {
        // Nothing listens on port 1
        let provider = ExchangeRateApiProvider::new("http://127.0.0.1:1");
        let result = provider.fetch_rates().await;

        assert!(result.is_fallback());
        let expected: RateTable = [
            ("USD", 1.0),
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("RUB", 92.5),
            ("JPY", 149.5),
            ("CNY", 7.24),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.into_rates(), expected);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_response = r#"{"rates": {"EUR": 0.8}}"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&format!("{}/", mock_server.uri()));
        let result = provider.fetch_rates().await;
        assert!(!result.is_fallback());
        assert_eq!(result.rates().get("EUR"), Some(0.8));
    }
}
