use crate::core::holding::{Holding, HoldingRecord};
use crate::core::market::MarketConfig;
use crate::store::{HoldingStore, NewHolding};
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory holdings table, used by tests and as a scratch store.
pub struct MemoryStore {
    rows: RwLock<BTreeMap<u64, HoldingRecord>>,
    markets: MarketConfig,
}

impl MemoryStore {
    pub fn new(markets: MarketConfig) -> Self {
        MemoryStore {
            rows: RwLock::new(BTreeMap::new()),
            markets,
        }
    }

    /// Inserts a raw record as-is, bypassing id assignment. Lets tests
    /// seed legacy rows that lack the currency field.
    pub fn insert_record(&self, record: HoldingRecord) {
        self.rows.write().unwrap().insert(record.id, record);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(MarketConfig::default())
    }
}

impl HoldingStore for MemoryStore {
    fn add(&self, holding: NewHolding) -> Result<Holding> {
        let mut rows = self.rows.write().unwrap();
        let id = rows.last_key_value().map_or(1, |(id, _)| id + 1);
        let record = HoldingRecord {
            id,
            symbol: holding.symbol,
            company_name: holding.company_name,
            quantity: holding.quantity,
            buy_price: holding.buy_price,
            currency: Some(holding.currency),
            date_added: holding.date_added,
        };
        rows.insert(id, record.clone());
        Ok(record.normalize(&self.markets))
    }

    fn list(&self) -> Result<Vec<Holding>> {
        let rows = self.rows.read().unwrap();
        Ok(rows
            .values()
            .cloned()
            .map(|record| record.normalize(&self.markets))
            .collect())
    }

    fn remove(&self, id: u64) -> Result<Option<Holding>> {
        let mut rows = self.rows.write().unwrap();
        Ok(rows.remove(&id).map(|record| record.normalize(&self.markets)))
    }

    fn clear(&self) -> Result<usize> {
        let mut rows = self.rows.write().unwrap();
        let count = rows.len();
        rows.clear();
        Ok(count)
    }
}
