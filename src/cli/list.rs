use super::ui;
use crate::store::HoldingStore;
use anyhow::Result;
use comfy_table::Cell;

pub fn run(store: &dyn HoldingStore) -> Result<()> {
    let holdings = store.list()?;
    if holdings.is_empty() {
        println!("Portfolio is empty.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Symbol"),
        ui::header_cell("Company"),
        ui::header_cell("Qty"),
        ui::header_cell("Buy Price"),
        ui::header_cell("Added"),
    ]);

    for holding in &holdings {
        table.add_row(vec![
            Cell::new(holding.id),
            Cell::new(&holding.symbol),
            Cell::new(&holding.company_name),
            Cell::new(holding.quantity),
            Cell::new(format!("{:.2} {}", holding.buy_price, holding.currency)),
            Cell::new(holding.date_added.format("%Y-%m-%d")),
        ]);
    }

    println!("{table}");
    Ok(())
}
