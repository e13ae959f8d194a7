use crate::core::currency::Currency;
use crate::store::HoldingStore;
use anyhow::Result;

pub fn run(store: &dyn HoldingStore) -> Result<()> {
    let holdings = store.list()?;
    if holdings.is_empty() {
        println!("Portfolio is empty.");
        return Ok(());
    }

    let indian = holdings
        .iter()
        .filter(|h| h.currency == Currency::Inr)
        .count();
    let international = holdings.len() - indian;

    println!("Total holdings: {}", holdings.len());
    println!("  Indian (INR): {indian}");
    println!("  International (USD): {international}");
    Ok(())
}
