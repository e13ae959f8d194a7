use crate::core::resolver::QuoteResolver;
use crate::store::{HoldingStore, NewHolding};
use anyhow::{Result, ensure};
use chrono::Utc;

pub async fn run(
    store: &dyn HoldingStore,
    resolver: &QuoteResolver,
    symbol: &str,
    quantity: u32,
    buy_price: f64,
) -> Result<()> {
    let symbol = symbol.trim().to_uppercase();
    ensure!(!symbol.is_empty(), "Symbol must not be empty");
    ensure!(quantity > 0, "Quantity must be positive");
    ensure!(
        buy_price.is_finite() && buy_price >= 0.0,
        "Buy price must not be negative"
    );

    let classification = resolver.markets().classify(&symbol);
    let currency = classification.market.currency();
    let company_name = resolver.resolve_company_name(&symbol).await;

    let holding = store.add(NewHolding {
        symbol: symbol.clone(),
        company_name,
        quantity,
        buy_price,
        currency,
        date_added: Utc::now(),
    })?;

    println!(
        "Added {} shares of {} ({}) at {:.2} {} [{} market]",
        holding.quantity,
        holding.symbol,
        holding.company_name,
        holding.buy_price,
        holding.currency,
        classification.market,
    );
    Ok(())
}
