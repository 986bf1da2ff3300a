mod aliases;
pub(crate) mod client;
pub mod providers;
mod quote;
mod resolver;
mod transport;

pub use aliases::SymbolAliases;
pub use client::ExchangeClient;
pub use quote::{ExchangeQuote, QuoteError};
pub use resolver::{PriceResolver, ResolvedPrice, SourceEndpoints, NO_VALID_PRICE};
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
