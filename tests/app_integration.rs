use axum::http::StatusCode;
use axum_test::TestServer;
use expense_tracker::core::config::{AppConfig, ExchangeRateProviderConfig};
use expense_tracker::core::rates::RateTable;
use expense_tracker::store::MemoryTransactionStore;
use expense_tracker::{build_rate_cache, server};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rates_mock_server(
        status: u16,
        mock_response: &str,
        expected_calls: u64,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn config_for(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.providers.exchange_rate = Some(ExchangeRateProviderConfig {
        base_url: base_url.to_string(),
    });
    config
}

fn test_server(config: &AppConfig) -> TestServer {
    let rates = build_rate_cache(config);
    let store = Arc::new(MemoryTransactionStore::new());
    let state = server::AppState::new(rates, store, config);
    TestServer::try_new(server::build_router(state)).expect("Could not create test server.")
}

#[test_log::test(tokio::test)]
async fn test_rates_are_fetched_once_and_cached() {
    let mock_response = r#"{
        "base": "USD",
        "rates": {"USD": 1, "EUR": 0.9, "GBP": 0.75, "RUB": 95.0, "JPY": 155.0, "CNY": 7.3}
    }"#;
    // Dropping the mock server verifies it saw exactly one request
    let mock_server = test_utils::create_rates_mock_server(200, mock_response, 1).await;
    let app = test_server(&config_for(&mock_server.uri()));

    for _ in 0..3 {
        let response = app.get(server::EXCHANGE_RATES).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["rates"]["EUR"], json!(0.9));
        assert_eq!(body["rates"]["JPY"], json!(155.0));
    }
    info!("Served three rate requests from one upstream fetch");
}

#[test_log::test(tokio::test)]
async fn test_unreachable_rates_api_serves_fallback() {
    let app = test_server(&config_for("http://127.0.0.1:1"));

    let response = app.get(server::EXCHANGE_RATES).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let rates: RateTable = serde_json::from_value(body["rates"].clone()).unwrap();
    assert_eq!(rates, RateTable::fallback());
}

#[test_log::test(tokio::test)]
async fn test_upstream_error_serves_fallback_and_is_cached() {
    let mock_server = test_utils::create_rates_mock_server(503, "", 1).await;
    let app = test_server(&config_for(&mock_server.uri()));

    for _ in 0..2 {
        let body: Value = app.get(server::BALANCE).await.json();
        assert_eq!(body["rate_source"], "fallback");
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_rates_mock() {
    let mock_response = r#"{"rates": {"EUR": 0.5, "GBP": 0.25}}"#;
    let mock_server = test_utils::create_rates_mock_server(200, mock_response, 1).await;
    let app = test_server(&config_for(&mock_server.uri()));

    let transactions = [
        json!({
            "amount": 2000.0,
            "description": "Monthly salary",
            "kind": "income",
            "category_id": "cat-salary",
            "date": "2024-06-01"
        }),
        json!({
            "amount": 100.0,
            "description": "Groceries",
            "kind": "expense",
            "category_id": "test-category-id",
            "date": "2024-06-02",
            "currency": "EUR"
        }),
        json!({
            "amount": 50.0,
            "kind": "expense",
            "category_id": "cat-transport",
            "date": "2024-06-03",
            "currency": "GBP"
        }),
    ];
    for transaction in &transactions {
        app
            .post(server::TRANSACTIONS)
            .json(transaction)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: Value = app.get(server::TRANSACTIONS).await.json();
    assert_eq!(page["total_items"], 3);
    assert_eq!(page["items"][0]["date"], "2024-06-03");
    assert_eq!(page["items"][2]["description"], "Monthly salary");

    // USD totals: income 2000, expenses 100 EUR = 200 USD and 50 GBP = 200 USD
    let balance: Value = app
        .get(server::BALANCE)
        .add_query_param("currency", "USD")
        .await
        .json();
    assert_eq!(balance["income"], json!(2000.0));
    assert_eq!(balance["expenses"], json!(400.0));
    assert_eq!(balance["balance"], json!(1600.0));
    assert_eq!(balance["formatted"]["income"], "+$2.00K");
    assert_eq!(balance["formatted"]["balance"], "$1.60K");
    assert_eq!(balance["rate_source"], "live");

    let balance: Value = app
        .get(server::BALANCE)
        .add_query_param("currency", "EUR")
        .await
        .json();
    assert_eq!(balance["balance"], json!(800.0));
    assert_eq!(balance["formatted"]["expenses"], "-€200.00");
}
