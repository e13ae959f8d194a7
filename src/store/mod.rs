//! Persistent storage for holding rows.
//!
//! The store owns the legacy/current schema duality: whatever shape a row
//! was written in, `list` hands back canonical holdings with the currency
//! populated, deriving it from the symbol for pre-currency rows.

pub mod disk;
pub mod memory;

use crate::core::currency::Currency;
use crate::core::holding::Holding;
use anyhow::Result;
use chrono::{DateTime, Utc};

/// A holding as captured at entry time, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewHolding {
    pub symbol: String,
    pub company_name: String,
    pub quantity: u32,
    pub buy_price: f64,
    pub currency: Currency,
    pub date_added: DateTime<Utc>,
}

pub trait HoldingStore: Send + Sync {
    /// Persists a new row and returns it with its assigned id.
    fn add(&self, holding: NewHolding) -> Result<Holding>;

    /// All rows, oldest first, normalized to the canonical shape.
    fn list(&self) -> Result<Vec<Holding>>;

    /// Removes one row, returning it if it existed.
    fn remove(&self, id: u64) -> Result<Option<Holding>>;

    /// Removes every row and returns how many were deleted.
    fn clear(&self) -> Result<usize>;
}
