//! Quote lookup abstractions.

use crate::core::currency::Currency;
use anyhow::Result;
use async_trait::async_trait;

/// A live quote, priced in the currency native to the symbol's market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub currency: Currency,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the current market price for an exchange-qualified symbol.
    async fn fetch_price(&self, api_symbol: &str) -> Result<f64>;

    /// Looks up the listed company name for an exchange-qualified symbol.
    async fn fetch_long_name(&self, api_symbol: &str) -> Result<String>;
}
