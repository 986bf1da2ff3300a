#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use spotbook::market_data::{
    ExchangeClient, ExchangeQuote, HttpTransport, QuoteError, TransportError,
};

/// Exchange client that always answers with the same quote and counts calls.
pub struct StubClient {
    name: String,
    quote: ExchangeQuote,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn priced(name: &str, price: Decimal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            quote: ExchangeQuote::ok(name, price),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &str, error: QuoteError) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            quote: ExchangeQuote::failed(name, error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeClient for StubClient {
    async fn get_price(&self, _symbol: &str) -> ExchangeQuote {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quote.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Exchange client that fails the test if it is ever consulted.
pub struct UnreachableClient(pub &'static str);

#[async_trait]
impl ExchangeClient for UnreachableClient {
    async fn get_price(&self, symbol: &str) -> ExchangeQuote {
        panic!("{} must not be queried for {symbol}", self.0);
    }

    fn name(&self) -> &str {
        self.0
    }
}

/// Prices per symbol, everything else fails; lets one client cover a whole portfolio.
pub struct TableClient {
    name: String,
    prices: Vec<(String, Decimal)>,
}

impl TableClient {
    pub fn new(name: &str, prices: &[(&str, Decimal)]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            prices: prices
                .iter()
                .map(|(symbol, price)| (symbol.to_lowercase(), *price))
                .collect(),
        })
    }
}

#[async_trait]
impl ExchangeClient for TableClient {
    async fn get_price(&self, symbol: &str) -> ExchangeQuote {
        let symbol = symbol.to_lowercase();
        match self.prices.iter().find(|(s, _)| *s == symbol) {
            Some((_, price)) => ExchangeQuote::ok(self.name.as_str(), *price),
            None => ExchangeQuote::failed(self.name.as_str(), QuoteError::InvalidPrice),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Transport that refuses every request and counts attempts.
#[derive(Default)]
pub struct DownTransport {
    requests: AtomicUsize,
}

impl DownTransport {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for DownTransport {
    async fn get(&self, _url: &str) -> Result<String, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Connect("network unreachable".to_string()))
    }
}
