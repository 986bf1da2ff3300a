use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::{ExchangeQuote, HttpTransport, QuoteError};

/// One external spot price source.
///
/// Implementations never fail: every transport or parsing problem is
/// reported through [`ExchangeQuote::error`].
#[async_trait::async_trait]
pub trait ExchangeClient: Send + Sync {
    async fn get_price(&self, symbol: &str) -> ExchangeQuote;

    fn name(&self) -> &str;
}

/// The quote currency itself is pegged at 1 and never hits the network.
pub(crate) fn is_quote_currency(symbol: &str, quote_currency: &str) -> bool {
    symbol.trim().eq_ignore_ascii_case(quote_currency)
}

/// GET `url` and decode the body as JSON.
pub(crate) async fn fetch_json(
    transport: &dyn HttpTransport,
    url: &str,
) -> Result<Value, QuoteError> {
    let body = transport
        .get(url)
        .await
        .map_err(|err| QuoteError::Request(err.to_string()))?;

    serde_json::from_str(&body)
        .map_err(|err| QuoteError::Request(format!("invalid JSON response: {err}")))
}

/// Accepts prices sent either as JSON numbers or numeric strings.
pub(crate) fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Render a status/error-code field for error messages.
pub(crate) fn field_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    }
}
