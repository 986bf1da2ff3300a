//! Coinone spot price client (public v1 ticker).

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::market_data::client::{decimal_from_json, fetch_json, field_label, is_quote_currency};
use crate::market_data::{ExchangeClient, ExchangeQuote, HttpTransport, QuoteError};

const COINONE_API_BASE: &str = "https://api.coinone.co.kr";
const NAME: &str = "Coinone";

pub struct CoinoneClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    quote_currency: String,
}

impl CoinoneClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: COINONE_API_BASE.to_string(),
            quote_currency: "KRW".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Only affects the peg; the v1 ticker always quotes in KRW.
    pub fn with_quote_currency(mut self, currency: impl Into<String>) -> Self {
        self.quote_currency = currency.into().to_uppercase();
        self
    }

    fn ticker_url(&self, symbol: &str) -> String {
        format!(
            "{}/ticker/?currency={}",
            self.base_url,
            symbol.trim().to_lowercase()
        )
    }
}

// errorCode arrives as "0" from the live API; accept a bare 0 as well.
fn is_success_code(code: Option<&Value>) -> bool {
    match code {
        Some(Value::String(s)) => s == "0",
        Some(Value::Number(n)) => n.as_i64() == Some(0),
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(rename = "errorCode", default)]
    error_code: Option<Value>,
    #[serde(default)]
    last: Value,
}

fn parse_ticker(data: Value) -> ExchangeQuote {
    let response = match serde_json::from_value::<TickerResponse>(data) {
        Ok(response) => response,
        Err(_) => return ExchangeQuote::failed(NAME, QuoteError::InvalidPrice),
    };

    let code = response.error_code.as_ref();
    if !is_success_code(code) {
        return ExchangeQuote::failed(NAME, QuoteError::ErrorCode(field_label(code)));
    }

    match decimal_from_json(&response.last) {
        Some(price) => ExchangeQuote::ok(NAME, price),
        None => ExchangeQuote::failed(NAME, QuoteError::InvalidPrice),
    }
}

#[async_trait::async_trait]
impl ExchangeClient for CoinoneClient {
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
