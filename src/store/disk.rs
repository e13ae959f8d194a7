use crate::core::holding::{Holding, HoldingRecord};
use crate::core::market::MarketConfig;
use crate::store::{HoldingStore, NewHolding};
use anyhow::{Context, Result, anyhow};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

/// Holdings table backed by a fjall keyspace. Keys are big-endian row ids,
/// so iteration order is insertion order; values are JSON records.
pub struct DiskStore {
    keyspace: Keyspace,
    holdings: PartitionHandle,
    markets: MarketConfig,
}

fn encode_id(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

fn decode_id(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| anyhow!("Malformed holding key of {} bytes", key.len()))?;
    Ok(u64::from_be_bytes(bytes))
}

impl DiskStore {
    pub fn open(path: &Path, markets: MarketConfig) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open holdings store at {}", path.display()))?;
        let holdings = keyspace.open_partition("holdings", PartitionCreateOptions::default())?;

        Ok(DiskStore {
            keyspace,
            holdings,
            markets,
        })
    }

    fn next_id(&self) -> Result<u64> {
        Ok(match self.holdings.last_key_value()? {
            Some((key, _)) => decode_id(&key)? + 1,
            None => 1,
        })
    }
}

impl HoldingStore for DiskStore {
    fn add(&self, holding: NewHolding) -> Result<Holding> {
        let id = self.next_id()?;
        let record = HoldingRecord {
            id,
            symbol: holding.symbol,
            company_name: holding.company_name,
            quantity: holding.quantity,
            buy_price: holding.buy_price,
            currency: Some(holding.currency),
            date_added: holding.date_added,
        };

        self.holdings
            .insert(encode_id(id), serde_json::to_vec(&record)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(id, "Stored holding");

        Ok(record.normalize(&self.markets))
    }

    fn list(&self) -> Result<Vec<Holding>> {
        let mut holdings = Vec::new();
        for kv in self.holdings.iter() {
            let (_key, value) = kv?;
            let record: HoldingRecord = serde_json::from_slice(&value)
                .context("Failed to decode stored holding record")?;
            holdings.push(record.normalize(&self.markets));
        }
        Ok(holdings)
    }

    fn remove(&self, id: u64) -> Result<Option<Holding>> {
        let key = encode_id(id);
        let Some(value) = self.holdings.get(key)? else {
            return Ok(None);
        };

        let record: HoldingRecord =
            serde_json::from_slice(&value).context("Failed to decode stored holding record")?;
        self.holdings.remove(key)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(id, "Removed holding");

        Ok(Some(record.normalize(&self.markets)))
    }

    fn clear(&self) -> Result<usize> {
        let mut keys = Vec::new();
        for kv in self.holdings.iter() {
            let (key, _value) = kv?;
            keys.push(key);
        }

        for key in &keys {
            self.holdings.remove(key.clone())?;
        }
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(count = keys.len(), "Cleared holdings");

        Ok(keys.len())
    }
}
