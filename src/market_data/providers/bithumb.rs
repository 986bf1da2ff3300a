//! Bithumb spot price client.
//!
//! The public ticker wraps its payload in `{ "status": "0000", "data": {...} }`;
//! any other status is an API-level rejection.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::market_data::client::{decimal_from_json, fetch_json, field_label, is_quote_currency};
use crate::market_data::{ExchangeClient, ExchangeQuote, HttpTransport, QuoteError};

const BITHUMB_API_BASE: &str = "https://api.bithumb.com";
const NAME: &str = "Bithumb";
const STATUS_OK: &str = "0000";

pub struct BithumbClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    quote_currency: String,
}

impl BithumbClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: BITHUMB_API_BASE.to_string(),
            quote_currency: "KRW".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_quote_currency(mut self, currency: impl Into<String>) -> Self {
        self.quote_currency = currency.into().to_uppercase();
        self
    }

    fn ticker_url(&self, symbol: &str) -> String {
        format!(
            "{}/public/ticker/{}_{}",
            self.base_url,
            symbol.trim().to_uppercase(),
            self.quote_currency
        )
    }
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    data: Option<TickerData>,
}

#[derive(Debug, Deserialize)]
struct TickerData {
    #[serde(default)]
    closing_price: Value,
}

fn parse_ticker(data: Value) -> ExchangeQuote {
    let response = match serde_json::from_value::<TickerResponse>(data) {
        Ok(response) => response,
        Err(_) => return ExchangeQuote::failed(NAME, QuoteError::InvalidPrice),
    };

    let status = response.status.as_ref();
    if status.and_then(Value::as_str) != Some(STATUS_OK) {
        return ExchangeQuote::failed(NAME, QuoteError::Status(field_label(status)));
    }

    let price = response
        .data
        .as_ref()
        .and_then(|payload| decimal_from_json(&payload.closing_price));

    match price {
        Some(price) => ExchangeQuote::ok(NAME, price),
        None => ExchangeQuote::failed(NAME, QuoteError::InvalidPrice),
    }
}

#[async_trait::async_trait]
impl ExchangeClient for BithumbClient {
    async fn get_price(&self, symbol: &str) -> ExchangeQuote {
        if is_quote_currency(symbol, &self.quote_currency) {
            return ExchangeQuote::peg(NAME);
        }

        match fetch_json(self.transport.as_ref(), &self.ticker_url(symbol)).await {
            Ok(data) => parse_ticker(data),
            Err(err) => ExchangeQuote::failed(NAME, err),
        }
    }

    fn name(&self) -> &str {
        NAME
    }
}
