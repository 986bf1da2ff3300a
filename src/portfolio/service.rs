use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use super::models::{Holding, PortfolioReport, PortfolioRow};
use crate::clock::{Clock, SystemClock};
use crate::market_data::PriceResolver;

/// Values holdings against resolved spot prices.
pub struct PortfolioAggregator {
    resolver: Arc<PriceResolver>,
    clock: Arc<dyn Clock>,
    quote_currency: String,
}

impl PortfolioAggregator {
    pub fn new(resolver: Arc<PriceResolver>) -> Self {
        Self {
            resolver,
            clock: Arc::new(SystemClock),
            quote_currency: "KRW".to_string(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_quote_currency(mut self, currency: impl Into<String>) -> Self {
        self.quote_currency = currency.into().to_uppercase();
        self
    }

    /// Resolve, value and rank every holding.
    ///
    /// Holdings without any usable price stay in the report at zero value.
    /// All rows share one capture timestamp.
    pub async fn build(&self, holdings: &[Holding]) -> PortfolioReport {
        let captured_at = self.clock.now();
        let mut rows = Vec::with_capacity(holdings.len() + 1);
        let mut total = Decimal::ZERO;

        for holding in holdings {
            let resolved = self.resolver.resolve(&holding.symbol).await;
            if !resolved.is_resolved() {
                warn!(symbol = %holding.symbol, "No exchange returned a valid price");
            }

            let mut value = resolved
                .price
                .checked_mul(holding.amount)
                .unwrap_or_else(|| {
                    warn!(
                        symbol = %holding.symbol,
                        amount = %holding.amount,
                        price = %resolved.price,
                        "Holding value overflowed, valuing at zero"
                    );
                    Decimal::ZERO
                });
            // The total must stay the exact sum of row values.
            match total.checked_add(value) {
                Some(sum) => total = sum,
                None => {
                    warn!(
                        symbol = %holding.symbol,
                        value = %value,
                        total = %total,
                        "Portfolio total overflowed, valuing holding at zero"
                    );
                    value = Decimal::ZERO;
                }
            }

            rows.push(PortfolioRow::holding(
                captured_at,
                &holding.symbol,
                holding.amount,
                resolved.price,
                resolved.source,
                value,
            ));
        }

        rows.sort_by(|a, b| b.value.cmp(&a.value));
        rows.push(PortfolioRow::total(captured_at, total));

        PortfolioReport {
            captured_at,
            quote_currency: self.quote_currency.clone(),
            rows,
        }
    }
}
