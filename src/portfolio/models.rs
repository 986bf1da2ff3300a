use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Symbol used for the synthetic grand-total row.
pub const TOTAL_SYMBOL: &str = "TOTAL";

/// An asset position to value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset code; compared case-insensitively.
    pub symbol: String,
    pub amount: Decimal,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, amount: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            amount,
        }
    }
}

/// One line of the portfolio report.
///
/// Holding rows carry every field. The total row leaves `amount`, `price` and
/// `source` empty; those render as "no value", never as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub amount: Option<Decimal>,
    pub price: Option<Decimal>,
    pub source: Option<String>,
    pub value: Decimal,
}

impl PortfolioRow {
    pub fn holding(
        timestamp: DateTime<Utc>,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
        source: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self {
            timestamp,
            symbol: symbol.to_uppercase(),
            amount: Some(amount),
            price: Some(price),
            source: Some(source.into()),
            value,
        }
    }

    pub fn total(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self {
            timestamp,
            symbol: TOTAL_SYMBOL.to_string(),
            amount: None,
            price: None,
            source: None,
            value,
        }
    }

    pub fn is_total(&self) -> bool {
        self.symbol == TOTAL_SYMBOL && self.amount.is_none()
    }
}

/// Valued holdings sorted by value (descending) followed by one total row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub captured_at: DateTime<Utc>,
    pub quote_currency: String,
    pub rows: Vec<PortfolioRow>,
}

impl PortfolioReport {
    /// Rows for individual holdings (everything but the trailing total).
    pub fn holdings(&self) -> &[PortfolioRow] {
        match self.rows.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn total(&self) -> Option<&PortfolioRow> {
        self.rows.last().filter(|row| row.is_total())
    }

    pub fn total_value(&self) -> Decimal {
        self.total().map(|row| row.value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn holding_row_uppercases_symbol() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let row = PortfolioRow::holding(
            ts,
            "btc",
            Decimal::ONE,
            Decimal::from(100),
            "Upbit",
            Decimal::from(100),
        );
        assert_eq!(row.symbol, "BTC");
        assert!(!row.is_total());
    }

    #[test]
    fn total_row_leaves_fields_empty() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let row = PortfolioRow::total(ts, Decimal::from(42));
        assert_eq!(row.symbol, "TOTAL");
        assert!(row.amount.is_none());
        assert!(row.price.is_none());
        assert!(row.source.is_none());
        assert!(row.is_total());
    }

    #[test]
    fn total_row_serializes_absent_fields_as_null() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let json = serde_json::to_value(PortfolioRow::total(ts, Decimal::from(42))).unwrap();
        assert!(json["amount"].is_null());
        assert!(json["price"].is_null());
        assert!(json["source"].is_null());
        assert_eq!(json["value"], "42");
    }
}
