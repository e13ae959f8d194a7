use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;
use crate::core::quote::QuoteProvider;

// Yahoo rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "nivesh/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

// YahooFinanceProvider implementation for QuoteProvider
pub struct YahooFinanceProvider {
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str) -> Self {
        YahooFinanceProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Vec<ChartItem>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    meta: ChartMeta,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    quotes: Vec<SearchQuote>,
}

#[derive(Deserialize, Debug)]
struct SearchQuote {
    longname: Option<String>,
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    #[instrument(
        name = "YahooPriceFetch",
        skip(self),
        fields(symbol = %api_symbol)
    )]
    async fn fetch_price(&self, api_symbol: &str) -> Result<f64> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, api_symbol);
        debug!("Requesting price data from {}", url);

        let client = http_client()?;
        let response = client.get(&url).send().await.map_err(|e| {
            anyhow!(
                "Request error: {} for symbol: {} URL: {}",
                e,
                api_symbol,
                url
            )
        })?;

        let data = response.json::<ChartResponse>().await?;
        let item = data
            .chart
            .result
            .first()
            .ok_or_else(|| anyhow!("No price data found for symbol: {}", api_symbol))?;

        item.meta
            .regular_market_price
            .ok_or_else(|| anyhow!("No market price in response for symbol: {}", api_symbol))
    }

    #[instrument(
        name = "YahooNameFetch",
        skip(self),
        fields(symbol = %api_symbol)
    )]
    async fn fetch_long_name(&self, api_symbol: &str) -> Result<String> {
        let url = format!("{}/v1/finance/search", self.base_url);
        debug!("Requesting name lookup from {}", url);

        let client = http_client()?;
        let response = client
            .get(&url)
            .query(&[("q", api_symbol)])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for symbol: {}", e, api_symbol))?;

        let data = response.json::<SearchResponse>().await?;
        data.quotes
            .into_iter()
            .next()
            .and_then(|quote| quote.longname)
            .ok_or_else(|| anyhow!("No name match found for symbol: {}", api_symbol))
    }
}

// YahooCurrencyProvider implementation for CurrencyRateProvider
pub struct YahooCurrencyProvider {
    base_url: String,
}

impl YahooCurrencyProvider {
    pub fn new(base_url: &str) -> Self {
        YahooCurrencyProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrencyResponse {
    chart: CurrencyChartResult,
}

#[derive(Debug, Deserialize)]
struct CurrencyChartResult {
    result: Vec<CurrencyChartItem>,
}

#[derive(Debug, Deserialize)]
struct CurrencyChartItem {
    meta: CurrencyChartMeta,
}

#[derive(Debug, Deserialize)]
struct CurrencyChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: f64,
}

#[async_trait]
impl CurrencyRateProvider for YahooCurrencyProvider {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        // Rates ride the chart endpoint through a pseudo-symbol, e.g. USDINR=X.
        let symbol = format!("{from}{to}=X");
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!("Requesting currency rate from {}", url);

        let client = http_client()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, symbol))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                symbol
            ));
        }

        let text = response.text().await?;
        let data: CurrencyResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", symbol, e))?;

        let item = data
            .chart
            .result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}", symbol))?;

        Ok(item.meta.regular_market_price)
    }
}
