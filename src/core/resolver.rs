//! Price and name resolution with deterministic fallback.

use crate::core::market::MarketConfig;
use crate::core::quote::{Quote, QuoteProvider};
use std::sync::Arc;
use tracing::debug;

/// Resolves live data for raw ticker symbols.
///
/// Lookups never fail: a provider error degrades to `None` for prices and
/// to the input symbol for company names. The quote currency comes from
/// the symbol's market, not from the provider payload.
pub struct QuoteResolver {
    markets: MarketConfig,
    provider: Arc<dyn QuoteProvider>,
}

impl QuoteResolver {
    pub fn new(markets: MarketConfig, provider: Arc<dyn QuoteProvider>) -> Self {
        QuoteResolver { markets, provider }
    }

    pub fn markets(&self) -> &MarketConfig {
        &self.markets
    }

    /// Current price for a raw symbol, or `None` when no data is available.
    pub async fn resolve_price(&self, symbol: &str) -> Option<Quote> {
        let classification = self.markets.classify(symbol);
        match self.provider.fetch_price(&classification.api_symbol).await {
            Ok(price) => Some(Quote {
                price,
                currency: classification.market.currency(),
            }),
            Err(e) => {
                debug!(symbol, error = %e, "Price lookup failed");
                None
            }
        }
    }

    /// Listed company name for a raw symbol, falling back to the symbol.
    pub async fn resolve_company_name(&self, symbol: &str) -> String {
        let classification = self.markets.classify(symbol);
        match self
            .provider
            .fetch_long_name(&classification.api_symbol)
            .await
        {
            Ok(name) => name,
            Err(e) => {
                debug!(symbol, error = %e, "Name lookup failed");
                symbol.to_string()
            }
        }
    }
}
