use std::fs;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn mount_chart(mock_server: &MockServer, symbol: &str, price: f64) {
        let url_path = format!("/v8/finance/chart/{symbol}");
        let body = format!(
            r#"{{
                "chart": {{
                    "result": [{{
                        "meta": {{
                            "regularMarketPrice": {price}
                        }}
                    }}]
                }}
            }}"#
        );

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub async fn mount_search(mock_server: &MockServer, api_symbol: &str, longname: &str) {
        let body = format!(r#"{{"quotes": [{{"longname": "{longname}"}}]}}"#);

        Mock::given(method("GET"))
            .and(path("/v1/finance/search"))
            .and(query_param("q", api_symbol))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub fn write_config(
        config_file: &tempfile::NamedTempFile,
        base_url: &str,
        data_path: &std::path::Path,
    ) {
        let config_content = format!(
            r#"
providers:
  yahoo:
    base_url: "{base_url}"
data_path: "{}"
"#,
            data_path.display()
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_chart(&mock_server, "TCS.NS", 3650.0).await;
    test_utils::mount_chart(&mock_server, "USDINR=X", 83.0).await;
    test_utils::mount_search(&mock_server, "TCS.NS", "Tata Consultancy Services Limited").await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());
    let config_path = config_file.path().to_str().unwrap();

    info!("Adding a holding through the full command path");
    let result = nivesh::run_command(
        nivesh::AppCommand::Add {
            symbol: "TCS".to_string(),
            quantity: 10,
            buy_price: 3500.0,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Add failed with: {:?}", result.err());

    let result = nivesh::run_command(nivesh::AppCommand::Summary, Some(config_path)).await;
    assert!(result.is_ok(), "Summary failed with: {:?}", result.err());

    // The stored row survived both commands with the classified currency.
    let config = nivesh::core::config::AppConfig::load_from_path(config_path).unwrap();
    let store =
        nivesh::store::disk::DiskStore::open(&config.data_dir().unwrap(), config.markets.clone())
            .unwrap();
    let holdings = nivesh::store::HoldingStore::list(&store).unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].symbol, "TCS");
    assert_eq!(holdings[0].currency, nivesh::core::Currency::Inr);
    assert_eq!(
        holdings[0].company_name,
        "Tata Consultancy Services Limited"
    );
}

#[test_log::test(tokio::test)]
async fn test_valuation_numbers_against_mocked_provider() {
    use nivesh::core::{MarketConfig, QuoteResolver, SessionRates, valuate};
    use nivesh::providers::yahoo::{YahooCurrencyProvider, YahooFinanceProvider};
    use std::sync::Arc;

    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_chart(&mock_server, "AAPL", 210.0).await;
    test_utils::mount_chart(&mock_server, "USDINR=X", 83.0).await;

    let resolver = QuoteResolver::new(
        MarketConfig::default(),
        Arc::new(YahooFinanceProvider::new(&mock_server.uri())),
    );
    let rates = SessionRates::new(
        Arc::new(YahooCurrencyProvider::new(&mock_server.uri())),
        nivesh::core::rates::FALLBACK_USD_INR,
    );

    let holdings = vec![nivesh::core::Holding {
        id: 1,
        symbol: "AAPL".to_string(),
        company_name: "Apple Inc.".to_string(),
        quantity: 5,
        buy_price: 200.0,
        currency: nivesh::core::Currency::Usd,
        date_added: chrono::Utc::now(),
    }];

    let valuation = valuate(&holdings, &resolver, &rates, &|| {}).await.unwrap();
    assert_eq!(valuation.usd_to_inr, 83.0);
    assert_eq!(valuation.totals.invested_inr, 83000.0);
    assert_eq!(valuation.totals.current_inr, 87150.0);
    assert_eq!(valuation.totals.pnl_inr, 4150.0);
    assert!((valuation.totals.pnl_percent - 5.0).abs() < 0.001);
}

#[test_log::test(tokio::test)]
async fn test_rate_endpoint_failure_degrades_to_fallback() {
    use nivesh::core::{MarketConfig, QuoteResolver, SessionRates, valuate};
    use nivesh::providers::yahoo::{YahooCurrencyProvider, YahooFinanceProvider};
    use std::sync::Arc;

    // Only the stock quote is mocked; the rate lookup will 404.
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_chart(&mock_server, "AAPL", 210.0).await;

    let resolver = QuoteResolver::new(
        MarketConfig::default(),
        Arc::new(YahooFinanceProvider::new(&mock_server.uri())),
    );
    let rates = SessionRates::new(
        Arc::new(YahooCurrencyProvider::new(&mock_server.uri())),
        nivesh::core::rates::FALLBACK_USD_INR,
    );

    let holdings = vec![nivesh::core::Holding {
        id: 1,
        symbol: "AAPL".to_string(),
        company_name: "Apple Inc.".to_string(),
        quantity: 2,
        buy_price: 100.0,
        currency: nivesh::core::Currency::Usd,
        date_added: chrono::Utc::now(),
    }];

    let valuation = valuate(&holdings, &resolver, &rates, &|| {}).await.unwrap();
    assert_eq!(valuation.usd_to_inr, 83.0);
    assert_eq!(valuation.totals.invested_inr, 2.0 * 100.0 * 83.0);
}

#[test_log::test(tokio::test)]
async fn test_summary_completes_when_every_lookup_fails() {
    // No mocks mounted at all: every request 404s.
    let mock_server = wiremock::MockServer::start().await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());
    let config_path = config_file.path().to_str().unwrap();

    // Name lookup fails too, so the symbol doubles as the company name.
    let result = nivesh::run_command(
        nivesh::AppCommand::Add {
            symbol: "AAPL".to_string(),
            quantity: 5,
            buy_price: 200.0,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Add failed with: {:?}", result.err());

    let result = nivesh::run_command(nivesh::AppCommand::Summary, Some(config_path)).await;
    assert!(result.is_ok(), "Summary failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_remove_and_stats_flow() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_search(&mock_server, "INFY.NS", "Infosys Limited").await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path());
    let config_path = config_file.path().to_str().unwrap();

    for (symbol, quantity, buy_price) in [("INFY", 4, 1450.0), ("MSFT", 2, 400.0)] {
        let result = nivesh::run_command(
            nivesh::AppCommand::Add {
                symbol: symbol.to_string(),
                quantity,
                buy_price,
            },
            Some(config_path),
        )
        .await;
        assert!(result.is_ok(), "Add failed with: {:?}", result.err());
    }

    let result = nivesh::run_command(nivesh::AppCommand::Stats, Some(config_path)).await;
    assert!(result.is_ok(), "Stats failed with: {:?}", result.err());

    let result = nivesh::run_command(nivesh::AppCommand::Remove { ids: vec![1] }, Some(config_path))
        .await;
    assert!(result.is_ok(), "Remove failed with: {:?}", result.err());

    let config = nivesh::core::config::AppConfig::load_from_path(config_path).unwrap();
    let store =
        nivesh::store::disk::DiskStore::open(&config.data_dir().unwrap(), config.markets.clone())
            .unwrap();
    let holdings = nivesh::store::HoldingStore::list(&store).unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].symbol, "MSFT");
    assert_eq!(holdings[0].currency, nivesh::core::Currency::Usd);
}

#[test_log::test(tokio::test)]
async fn test_config_file_markets_drive_classification() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_chart(&mock_server, "ZOMATO.NS", 250.0).await;
    test_utils::mount_chart(&mock_server, "USDINR=X", 83.0).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_content = format!(
        r#"
providers:
  yahoo:
    base_url: "{}"
markets:
  indian_symbols: ["ZOMATO"]
data_path: "{}"
"#,
        mock_server.uri(),
        data_dir.path().display()
    );
    fs::write(config_file.path(), config_content).expect("Failed to write config file");
    let config_path = config_file.path().to_str().unwrap();

    let result = nivesh::run_command(
        nivesh::AppCommand::Add {
            symbol: "ZOMATO".to_string(),
            quantity: 100,
            buy_price: 200.0,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Add failed with: {:?}", result.err());

    let config = nivesh::core::config::AppConfig::load_from_path(config_path).unwrap();
    let store =
        nivesh::store::disk::DiskStore::open(&config.data_dir().unwrap(), config.markets.clone())
            .unwrap();
    let holdings = nivesh::store::HoldingStore::list(&store).unwrap();
    assert_eq!(holdings[0].currency, nivesh::core::Currency::Inr);

    let result = nivesh::run_command(nivesh::AppCommand::Summary, Some(config_path)).await;
    assert!(result.is_ok(), "Summary failed with: {:?}", result.err());
}
