use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::providers::{BithumbClient, CoinGeckoClient, CoinoneClient, UpbitClient};
use super::{ExchangeClient, HttpTransport, SymbolAliases};

/// Source label recorded when every client declined.
pub const NO_VALID_PRICE: &str = "No valid price found";

/// Base URLs for the default exchange chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceEndpoints {
    pub upbit: String,
    pub bithumb: String,
    pub coinone: String,
    pub coingecko: String,
}

impl SourceEndpoints {
    /// Point every source at the same host (useful for local mocks).
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            upbit: base_url.clone(),
            bithumb: base_url.clone(),
            coinone: base_url.clone(),
            coingecko: base_url,
        }
    }
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            upbit: "https://api.upbit.com".to_string(),
            bithumb: "https://api.bithumb.com".to_string(),
            coinone: "https://api.coinone.co.kr".to_string(),
            coingecko: "https://api.coingecko.com".to_string(),
        }
    }
}

/// Price accepted for a symbol, or the "no valid price" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrice {
    pub price: Decimal,
    pub source: String,
}

impl ResolvedPrice {
    pub fn unresolved() -> Self {
        Self {
            price: Decimal::ZERO,
            source: NO_VALID_PRICE.to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

/// Walks exchange clients in priority order and keeps the first usable price.
pub struct PriceResolver {
    clients: Vec<Arc<dyn ExchangeClient>>,
}

impl PriceResolver {
    /// Resolver over an explicit priority order (first entry wins ties).
    pub fn new(clients: Vec<Arc<dyn ExchangeClient>>) -> Self {
        Self { clients }
    }

    /// The production chain: Upbit, Bithumb, Coinone, CoinGecko.
    pub fn default_chain(
        transport: Arc<dyn HttpTransport>,
        quote_currency: &str,
        aliases: Arc<SymbolAliases>,
        endpoints: &SourceEndpoints,
    ) -> Self {
        let clients: Vec<Arc<dyn ExchangeClient>> = vec![
            Arc::new(
                UpbitClient::new(transport.clone())
                    .with_base_url(&endpoints.upbit)
                    .with_quote_currency(quote_currency),
            ),
            Arc::new(
                BithumbClient::new(transport.clone())
                    .with_base_url(&endpoints.bithumb)
                    .with_quote_currency(quote_currency),
            ),
            Arc::new(
                CoinoneClient::new(transport.clone())
                    .with_base_url(&endpoints.coinone)
                    .with_quote_currency(quote_currency),
            ),
            Arc::new(
                CoinGeckoClient::new(transport)
                    .with_base_url(&endpoints.coingecko)
                    .with_quote_currency(quote_currency)
                    .with_aliases(aliases),
            ),
        ];
        Self::new(clients)
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.clients.iter().map(|client| client.name()).collect()
    }

    pub async fn resolve(&self, symbol: &str) -> ResolvedPrice {
        for client in &self.clients {
            let quote = client.get_price(symbol).await;
            if quote.is_usable() {
                info!(symbol, source = client.name(), price = %quote.price, "Resolved price");
                return ResolvedPrice {
                    price: quote.price,
                    source: client.name().to_string(),
                };
            }
            let reason = quote
                .error_message()
                .unwrap_or_else(|| "non-positive price".to_string());
            debug!(
                symbol,
                source = client.name(),
                error = %reason,
                "Source declined, trying next"
            );
        }
        ResolvedPrice::unresolved()
    }
}
