use crate::store::HoldingStore;
use anyhow::Result;
use console::Term;

pub fn run(store: &dyn HoldingStore, ids: &[u64]) -> Result<()> {
    for id in ids {
        match store.remove(*id)? {
            Some(holding) => println!(
                "Deleted {} shares of {} ({})",
                holding.quantity, holding.symbol, holding.company_name
            ),
            None => println!("No holding with id {id}"),
        }
    }
    Ok(())
}

/// Deletes every holding after `--yes` or a typed confirmation.
pub fn clear(store: &dyn HoldingStore, assume_yes: bool) -> Result<()> {
    let holdings = store.list()?;
    if holdings.is_empty() {
        println!("Portfolio is already empty.");
        return Ok(());
    }

    println!(
        "This will permanently delete all {} holdings:",
        holdings.len()
    );
    for holding in &holdings {
        println!(
            "  {} ({}) - {} shares",
            holding.symbol, holding.company_name, holding.quantity
        );
    }

    if !assume_yes {
        let term = Term::stdout();
        term.write_str("Type 'DELETE ALL' to confirm: ")?;
        let confirmation = term.read_line()?;
        if confirmation.trim() != "DELETE ALL" {
            println!("Operation cancelled. No data was deleted.");
            return Ok(());
        }
    }

    let count = store.clear()?;
    println!("Deleted all {count} holdings.");
    Ok(())
}
