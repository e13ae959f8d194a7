//! Portfolio valuation in the INR reporting currency.

use crate::core::currency::Currency;
use crate::core::holding::Holding;
use crate::core::quote::Quote;
use crate::core::rates::SessionRates;
use crate::core::resolver::QuoteResolver;
use anyhow::Result;
use tracing::debug;

/// One valued holding. Conversion to INR happens exactly once per amount,
/// at the point it enters the row.
#[derive(Debug, Clone)]
pub struct ValuationRow {
    pub holding: Holding,
    pub quote: Option<Quote>,
    pub invested_inr: f64,
    pub current_value_inr: Option<f64>,
    pub pnl_inr: Option<f64>,
    pub pnl_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioTotals {
    pub invested_inr: f64,
    pub current_inr: f64,
    pub pnl_inr: f64,
    pub pnl_percent: f64,
}

#[derive(Debug)]
pub struct PortfolioValuation {
    pub rows: Vec<ValuationRow>,
    pub totals: PortfolioTotals,
    pub usd_to_inr: f64,
}

fn to_inr(amount: f64, currency: Currency, usd_to_inr: f64) -> f64 {
    match currency {
        Currency::Inr => amount,
        Currency::Usd => amount * usd_to_inr,
    }
}

/// Values each holding independently and aggregates INR totals.
///
/// Rows without an available quote carry no current value and contribute
/// nothing to the totals. Missing market data never fails the pass; only
/// a malformed holding does. Quotes are fetched sequentially, one network
/// round trip per holding, and `progress` is invoked once per row.
pub async fn valuate(
    holdings: &[Holding],
    resolver: &QuoteResolver,
    rates: &SessionRates,
    progress: &(dyn Fn() + Sync),
) -> Result<PortfolioValuation> {
    let usd_to_inr = rates.usd_to_inr().await;

    let mut rows = Vec::with_capacity(holdings.len());
    let mut totals = PortfolioTotals::default();

    for holding in holdings {
        holding.validate()?;

        let quote = resolver.resolve_price(&holding.symbol).await;
        let invested_inr = to_inr(
            f64::from(holding.quantity) * holding.buy_price,
            holding.currency,
            usd_to_inr,
        );

        let (current_value_inr, pnl_inr, pnl_percent) = match quote {
            Some(quote) => {
                let current = to_inr(
                    f64::from(holding.quantity) * quote.price,
                    quote.currency,
                    usd_to_inr,
                );
                let pnl = current - invested_inr;
                let percent = if invested_inr > 0.0 {
                    Some(pnl / invested_inr * 100.0)
                } else {
                    None
                };

                totals.invested_inr += invested_inr;
                totals.current_inr += current;

                (Some(current), Some(pnl), percent)
            }
            None => {
                debug!(symbol = %holding.symbol, "No quote available, row excluded from totals");
                (None, None, None)
            }
        };

        rows.push(ValuationRow {
            holding: holding.clone(),
            quote,
            invested_inr,
            current_value_inr,
            pnl_inr,
            pnl_percent,
        });
        progress();
    }

    totals.pnl_inr = totals.current_inr - totals.invested_inr;
    totals.pnl_percent = if totals.invested_inr > 0.0 {
        totals.pnl_inr / totals.invested_inr * 100.0
    } else {
        0.0
    };

    Ok(PortfolioValuation {
        rows,
        totals,
        usd_to_inr,
    })
}
