//! Upbit spot price client.
//!
//! Uses the public ticker endpoint, which returns a JSON array with one entry
//! per requested market.
//! Docs: https://global-docs.upbit.com/reference/ticker-current-price

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::market_data::client::{decimal_from_json, fetch_json, is_quote_currency};
use crate::market_data::{ExchangeClient, ExchangeQuote, HttpTransport, QuoteError};

const UPBIT_API_BASE: &str = "https://api.upbit.com";
const NAME: &str = "Upbit";

pub struct UpbitClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    quote_currency: String,
}

impl UpbitClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: UPBIT_API_BASE.to_string(),
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
            "{}/v1/ticker?markets={}-{}",
            self.base_url,
            self.quote_currency,
            symbol.trim().to_uppercase()
        )
    }
}

#[derive(Debug, Deserialize)]
struct Ticker {
    #[serde(default)]
    trade_price: Value,
}

fn parse_ticker(data: Value) -> ExchangeQuote {
    let Ok(tickers) = serde_json::from_value::<Vec<Ticker>>(data) else {
        return ExchangeQuote::failed(NAME, QuoteError::InvalidPrice);
    };
    let Some(first) = tickers.first() else {
        return ExchangeQuote::failed(NAME, QuoteError::EmptyResponse);
    };

    match decimal_from_json(&first.trade_price) {
        Some(price) => ExchangeQuote::ok(NAME, price),
        None => ExchangeQuote::failed(NAME, QuoteError::InvalidPrice),
    }
}

#[async_trait::async_trait]
impl ExchangeClient for UpbitClient {
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
