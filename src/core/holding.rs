//! Holding rows and the legacy/current schema normalization.

use crate::core::currency::Currency;
use crate::core::market::MarketConfig;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A canonical holding row. `currency` is always populated; records read
/// from older stores derive it from the symbol on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: u64,
    pub symbol: String,
    pub company_name: String,
    pub quantity: u32,
    pub buy_price: f64,
    pub currency: Currency,
    pub date_added: DateTime<Utc>,
}

impl Holding {
    /// Rejects rows that would produce a nonsensical valuation.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            anyhow::bail!("Invalid holding {}: quantity must be positive", self.symbol);
        }
        if self.buy_price.is_nan() || self.buy_price < 0.0 {
            anyhow::bail!(
                "Invalid holding {}: buy price must not be negative",
                self.symbol
            );
        }
        Ok(())
    }
}

/// On-disk holding shape. Rows written before currency tracking was added
/// carry no `currency` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub id: u64,
    pub symbol: String,
    pub company_name: String,
    pub quantity: u32,
    pub buy_price: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
    pub date_added: DateTime<Utc>,
}

impl HoldingRecord {
    /// Produces the canonical shape, classifying the symbol for legacy rows.
    pub fn normalize(self, markets: &MarketConfig) -> Holding {
        let currency = self
            .currency
            .unwrap_or_else(|| markets.classify(&self.symbol).market.currency());

        Holding {
            id: self.id,
            symbol: self.symbol,
            company_name: self.company_name,
            quantity: self.quantity,
            buy_price: self.buy_price,
            currency,
            date_added: self.date_added,
        }
    }
}
