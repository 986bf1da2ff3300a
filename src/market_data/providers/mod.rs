pub mod bithumb;
pub mod coingecko;
pub mod coinone;
pub mod upbit;

pub use bithumb::BithumbClient;
pub use coingecko::CoinGeckoClient;
pub use coinone::CoinoneClient;
pub use upbit::UpbitClient;
