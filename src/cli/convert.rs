use crate::core::convert::{convert, format_money};
use crate::core::currency::is_supported;
use crate::core::rates::RateSource;
use crate::providers::RateCache;
use anyhow::{Result, bail};

/// Converts `amount` with the cached rates and renders a one line summary.
pub async fn display_conversion(
    rates: &RateCache,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<String> {
    let from = from.to_uppercase();
    let to = to.to_uppercase();
    for code in [&from, &to] {
        if !is_supported(code) {
            bail!("Unsupported currency: {code}");
        }
    }

    let snapshot = rates.snapshot().await;
    let converted = convert(amount, &from, &to, &snapshot.rates);
    tracing::debug!(amount, %from, %to, converted, "Converted amount");

    let mut line = format!(
        "{} {from} = {} {to} ({converted:.4})",
        format_money(amount, &from),
        format_money(converted, &to),
    );
    if snapshot.source == RateSource::Fallback {
        line.push_str(" [fallback rates]");
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{RateFetch, RateProvider, RateTable};
    use crate::providers::DEFAULT_RATE_TTL;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FallbackProvider;

    #[async_trait]
    impl RateProvider for FallbackProvider {
        async fn fetch_rates(&self) -> RateFetch {
            RateFetch::Fallback(RateTable::fallback())
        }
    }

    fn cache() -> RateCache {
        RateCache::with_system_clock(Arc::new(FallbackProvider), DEFAULT_RATE_TTL)
    }

    #[tokio::test]
    async fn test_display_conversion() {
        let line = display_conversion(&cache(), 100.0, "usd", "eur")
            .await
            .unwrap();
        assert_eq!(line, "$100.00 USD = €92.00 EUR (92.0000) [fallback rates]");
    }

    #[tokio::test]
    async fn test_unsupported_currency() {
        let result = display_conversion(&cache(), 1.0, "USD", "CHF").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unsupported currency: CHF"
        );
    }
}
