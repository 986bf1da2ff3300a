//! CoinGecko spot price client.
//!
//! Uses the `/simple/price` endpoint, keyed by CoinGecko coin id rather than
//! exchange ticker, so symbols are translated through [`SymbolAliases`] first.
//! No API key is required for basic usage, though rate limits apply.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::market_data::client::{decimal_from_json, fetch_json, is_quote_currency};
use crate::market_data::{ExchangeClient, ExchangeQuote, HttpTransport, QuoteError, SymbolAliases};

const COINGECKO_API_BASE: &str = "https://api.coingecko.com";
const NAME: &str = "Coingecko";

/// `/simple/price` body: coin id -> quote currency -> price.
type SimplePriceResponse = HashMap<String, HashMap<String, Value>>;

pub struct CoinGeckoClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    /// Quote currency for prices (lowercase, e.g. "krw")
    quote_currency: String,
    aliases: Arc<SymbolAliases>,
}

impl CoinGeckoClient {
    /// Creates a client quoting in KRW with the built-in alias table.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: COINGECKO_API_BASE.to_string(),
            quote_currency: "krw".to_string(),
            aliases: Arc::new(SymbolAliases::builtin()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_quote_currency(mut self, currency: impl Into<String>) -> Self {
        self.quote_currency = currency.into().to_lowercase();
        self
    }

    pub fn with_aliases(mut self, aliases: Arc<SymbolAliases>) -> Self {
        self.aliases = aliases;
        self
    }

    fn price_url(&self, coin_id: &str) -> String {
        format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies={}",
            self.base_url, coin_id, self.quote_currency
        )
    }

    fn parse_price(&self, symbol: &str, coin_id: &str, data: Value) -> ExchangeQuote {
        let price = serde_json::from_value::<SimplePriceResponse>(data)
            .ok()
            .and_then(|response| {
                response
                    .get(coin_id)
                    .and_then(|prices| prices.get(&self.quote_currency))
                    .and_then(decimal_from_json)
            });

        match price {
            Some(price) if price > rust_decimal::Decimal::ZERO => ExchangeQuote::ok(NAME, price),
            _ => ExchangeQuote::failed(NAME, QuoteError::Unavailable(symbol.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl ExchangeClient for CoinGeckoClient {
    async fn get_price(&self, symbol: &str) -> ExchangeQuote {
        if is_quote_currency(symbol, &self.quote_currency) {
            return ExchangeQuote::peg(NAME);
        }

        let coin_id = self.aliases.translate(symbol.trim());
        match fetch_json(self.transport.as_ref(), &self.price_url(&coin_id)).await {
            Ok(data) => self.parse_price(symbol, &coin_id, data),
            Err(err) => ExchangeQuote::failed(NAME, err),
        }
    }

    fn name(&self) -> &str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::ReqwestTransport;
    use std::time::Duration;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn client() -> CoinGeckoClient {
        let transport = ReqwestTransport::new(Duration::from_secs(10)).expect("http transport");
        CoinGeckoClient::new(Arc::new(transport))
    }

    #[test]
    fn parse_simple_price_response() {
        let data = json!({ "bitcoin": { "krw": 57102345.12 } });
        let quote = client().parse_price("btc", "bitcoin", data);
        assert_eq!(quote.source, "Coingecko");
        assert_eq!(quote.price, Decimal::from_str("57102345.12").unwrap());
        assert!(quote.error.is_none());
    }

    #[test]
    fn missing_coin_id_is_unavailable() {
        let quote = client().parse_price("pepe", "pepe", json!({}));
        assert_eq!(quote.error, Some(QuoteError::Unavailable("pepe".to_string())));
        assert_eq!(
            quote.error_message().as_deref(),
            Some("Error: Unable to get price for pepe")
        );
    }

    #[test]
    fn missing_quote_currency_is_unavailable() {
        let data = json!({ "bitcoin": { "usd": 42850.12 } });
        let quote = client().parse_price("btc", "bitcoin", data);
        assert_eq!(quote.error, Some(QuoteError::Unavailable("btc".to_string())));
    }

    #[test]
    fn zero_or_garbage_price_is_unavailable() {
        let quote = client().parse_price("btc", "bitcoin", json!({ "bitcoin": { "krw": 0 } }));
        assert_eq!(quote.error, Some(QuoteError::Unavailable("btc".to_string())));

        let quote = client().parse_price("btc", "bitcoin", json!({ "bitcoin": "oops" }));
        assert_eq!(quote.price, Decimal::ZERO);
        assert!(quote.is_error());
    }

    #[test]
    fn price_url_uses_translated_id_and_lowercase_quote() {
        let client = client()
            .with_base_url("http://localhost:9000")
            .with_quote_currency("KRW");
        let coin_id = client.aliases.translate("VIRTUAL");
        assert_eq!(
            client.price_url(&coin_id),
            "http://localhost:9000/api/v3/simple/price?ids=virtual-protocol&vs_currencies=krw"
        );
    }

    #[test]
    fn custom_aliases_are_used() {
        let aliases = SymbolAliases::empty().with_alias("BTC", "wrapped-bitcoin");
        let client = client().with_aliases(Arc::new(aliases));
        assert_eq!(client.aliases.translate("btc"), "wrapped-bitcoin");
    }
}
