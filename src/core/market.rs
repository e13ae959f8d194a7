//! Symbol classification between Indian and international markets.
//!
//! Classification is a heuristic: an exchange suffix wins, then a curated
//! allow-list of NSE tickers, and everything else is treated as
//! international. The suffixes and the allow-list live in the config file
//! so new symbols can be added without touching this logic.

use crate::core::currency::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Indian,
    International,
}

impl Market {
    /// Native trading currency for the market.
    pub fn currency(self) -> Currency {
        match self {
            Market::Indian => Currency::Inr,
            Market::International => Currency::Usd,
        }
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Market::Indian => "indian",
                Market::International => "international",
            }
        )
    }
}

/// Outcome of classifying a raw ticker string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub market: Market,
    /// The exchange-qualified form sent to the quote API.
    pub api_symbol: String,
}

fn default_indian_suffixes() -> Vec<String> {
    vec![".NS".to_string(), ".BO".to_string()]
}

fn default_quote_suffix() -> String {
    ".NS".to_string()
}

fn default_indian_symbols() -> HashSet<String> {
    [
        "TCS",
        "INFY",
        "RELIANCE",
        "HDFCBANK",
        "ICICIBANK",
        "ITC",
        "HINDUNILVR",
        "SBIN",
        "BHARTIARTL",
        "KOTAKBANK",
        "LT",
        "ASIANPAINT",
        "MARUTI",
        "HCLTECH",
        "WIPRO",
        "TECHM",
        "TITAN",
        "ULTRACEMCO",
        "NESTLEIND",
        "POWERGRID",
        "TATAMOTORS",
        "M&M",
        "ONGC",
        "NTPC",
        "COALINDIA",
        "JSWSTEEL",
        "TATASTEEL",
        "HINDALCO",
        "BAJFINANCE",
        "BAJAJFINSV",
        "AXISBANK",
        "SUNPHARMA",
        "DRREDDY",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Exchange suffixes that mark a symbol as already Indian.
    #[serde(default = "default_indian_suffixes")]
    pub indian_suffixes: Vec<String>,
    /// Suffix appended to bare NSE tickers for the quote API.
    #[serde(default = "default_quote_suffix")]
    pub quote_suffix: String,
    /// Known NSE tickers traded without a suffix.
    #[serde(default = "default_indian_symbols")]
    pub indian_symbols: HashSet<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            indian_suffixes: default_indian_suffixes(),
            quote_suffix: default_quote_suffix(),
            indian_symbols: default_indian_symbols(),
        }
    }
}

impl MarketConfig {
    /// Classifies a raw ticker. Never fails; unknown symbols are
    /// international and pass through unchanged.
    pub fn classify(&self, symbol: &str) -> Classification {
        if self
            .indian_suffixes
            .iter()
            .any(|suffix| symbol.ends_with(suffix.as_str()))
        {
            return Classification {
                market: Market::Indian,
                api_symbol: symbol.to_string(),
            };
        }

        if self.indian_symbols.contains(&symbol.to_uppercase()) {
            return Classification {
                market: Market::Indian,
                api_symbol: format!("{}{}", symbol, self.quote_suffix),
            };
        }

        Classification {
            market: Market::International,
            api_symbol: symbol.to_string(),
        }
    }
}
