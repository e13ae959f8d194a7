use super::ui;
use crate::core::rates::SessionRates;
use crate::core::resolver::QuoteResolver;
use crate::core::valuation::{PortfolioValuation, valuate};
use crate::store::HoldingStore;
use anyhow::Result;
use comfy_table::Cell;

fn render(valuation: &PortfolioValuation) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Company"),
        ui::header_cell("Qty"),
        ui::header_cell("Buy Price"),
        ui::header_cell("Current"),
        ui::header_cell("Value (INR)"),
        ui::header_cell("P&L (INR)"),
        ui::header_cell("P&L (%)"),
    ]);

    for row in &valuation.rows {
        let holding = &row.holding;

        let buy_price = Cell::new(format!("{:.2} {}", holding.buy_price, holding.currency));
        let current_price = ui::format_optional_cell(row.quote, |quote| {
            format!("{:.2} {}", quote.price, quote.currency)
        });
        let current_value = ui::format_optional_cell(row.current_value_inr, |v| format!("{v:.2}"));
        let pnl = match row.pnl_inr {
            Some(pnl) => ui::pnl_cell(pnl, format!("{pnl:+.2}")),
            None => ui::na_cell(),
        };
        let pnl_percent = match row.pnl_percent {
            Some(percent) => ui::pnl_cell(percent, format!("{percent:+.2}%")),
            None => ui::na_cell(),
        };

        table.add_row(vec![
            Cell::new(&holding.symbol),
            Cell::new(&holding.company_name),
            Cell::new(holding.quantity),
            buy_price,
            current_price,
            current_value,
            pnl,
            pnl_percent,
        ]);
    }

    let totals = &valuation.totals;
    let totals_style = if totals.pnl_inr >= 0.0 {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Loss
    };

    let mut output = format!(
        "{}\n\nUSD/INR rate: {:.2}\n\n",
        ui::style_text("Portfolio", ui::StyleType::Title),
        valuation.usd_to_inr
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{} {:.2}\n{} {:.2}\n{} {}",
        ui::style_text("Total Invested (INR):", ui::StyleType::TotalLabel),
        totals.invested_inr,
        ui::style_text("Current Value (INR): ", ui::StyleType::TotalLabel),
        totals.current_inr,
        ui::style_text("Total P&L (INR):     ", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:+.2} ({:+.2}%)", totals.pnl_inr, totals.pnl_percent),
            totals_style
        ),
    ));

    output
}

pub async fn run(
    store: &dyn HoldingStore,
    resolver: &QuoteResolver,
    rates: &SessionRates,
) -> Result<()> {
    let holdings = store.list()?;
    if holdings.is_empty() {
        println!("Portfolio is empty. Add some holdings first.");
        return Ok(());
    }

    let pb = ui::new_progress_bar(holdings.len() as u64, true);
    pb.set_message("Fetching quotes...");

    let valuation = valuate(&holdings, resolver, rates, &|| pb.inc(1)).await?;
    pb.finish_and_clear();

    println!("{}", render(&valuation));
    Ok(())
}
