use std::collections::HashMap;

/// Built-in short code -> CoinGecko id mappings.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("xrp", "ripple"),
    ("ada", "cardano"),
    ("doge", "dogecoin"),
    ("link", "chainlink"),
    ("uni", "uniswap"),
    ("ai16z", "ai16z"),
    ("virtual", "virtual-protocol"),
    ("sui", "sui"),
    ("fet", "fetch-ai"),
    ("usdc", "usd-coin"),
    ("usdt", "tether"),
    ("bnb", "binancecoin"),
    ("dot", "polkadot"),
    ("matic", "matic-network"),
    ("pol", "matic-network"),
    ("ltc", "litecoin"),
    ("shib", "shiba-inu"),
    ("trx", "tron"),
    ("avax", "avalanche-2"),
    ("dai", "dai"),
    ("atom", "cosmos"),
    ("etc", "ethereum-classic"),
    ("xlm", "stellar"),
    ("bch", "bitcoin-cash"),
    ("algo", "algorand"),
    ("hbar", "hedera-hashgraph"),
    ("near", "near"),
    ("apt", "aptos"),
    ("arb", "arbitrum"),
    ("op", "optimism"),
    ("aave", "aave"),
    ("sand", "the-sandbox"),
    ("mana", "decentraland"),
    ("klay", "klay-token"),
    ("wbtc", "wrapped-bitcoin"),
];

/// Read-only translation from exchange ticker codes to CoinGecko coin ids.
///
/// Keys are case-insensitive. Unknown codes translate to their lowercase
/// form, which matches CoinGecko's id for many smaller coins.
#[derive(Debug, Clone)]
pub struct SymbolAliases {
    entries: HashMap<String, String>,
}

impl SymbolAliases {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ALIASES
                .iter()
                .map(|(code, id)| (code.to_string(), id.to_string()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Layer overrides on top of the current table.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        for (code, id) in overrides {
            self.entries.insert(code.to_lowercase(), id);
        }
        self
    }

    pub fn with_alias(mut self, code: impl AsRef<str>, id: impl Into<String>) -> Self {
        self.entries.insert(code.as_ref().to_lowercase(), id.into());
        self
    }

    pub fn translate(&self, symbol: &str) -> String {
        let code = symbol.to_lowercase();
        self.entries.get(&code).cloned().unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolAliases {
    fn default() -> Self {
        Self::builtin()
    }
}
