use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::ResolvedConfig;
use crate::holdings::{holdings_from_entries, holdings_from_env};
use crate::market_data::{HttpTransport, PriceResolver, ReqwestTransport, SymbolAliases};
use crate::portfolio::{Holding, PortfolioAggregator, PortfolioReport};

/// Load the dotenv file (if present) and collect every configured holding.
///
/// Config-file holdings come first, followed by env-declared ones. Bad
/// entries are skipped with a warning; only an unreadable dotenv file fails.
pub fn load_holdings(config: &ResolvedConfig) -> Result<Vec<Holding>> {
    if let Some(env_file) = config.env_file.as_deref() {
        load_env_file(env_file)?;
    }

    let mut holdings = holdings_from_entries(&config.config.holdings);
    holdings.extend(holdings_from_env(&config.config.env_prefix));

    info!(count = holdings.len(), "Loaded holdings");
    Ok(holdings)
}

fn load_env_file(path: &Path) -> Result<()> {
    if !path.exists() {
        debug!(path = %path.display(), "No env file, using process environment only");
        return Ok(());
    }

    dotenvy::from_path(path)
        .with_context(|| format!("Failed to load env file: {}", path.display()))?;
    debug!(path = %path.display(), "Loaded env file");
    Ok(())
}

/// Build the production exchange chain from config.
pub fn build_resolver(config: &ResolvedConfig, transport: Arc<dyn HttpTransport>) -> PriceResolver {
    let config = &config.config;
    let aliases = SymbolAliases::builtin().with_overrides(config.aliases.clone());

    PriceResolver::default_chain(
        transport,
        &config.quote_currency,
        Arc::new(aliases),
        &config.endpoints,
    )
}

/// Value `holdings` using the configured exchanges.
pub async fn portfolio_report(
    config: &ResolvedConfig,
    holdings: &[Holding],
    clock: Arc<dyn Clock>,
) -> Result<PortfolioReport> {
    let transport = ReqwestTransport::new(config.config.request_timeout)
        .context("Failed to build HTTP transport")?;
    let resolver = build_resolver(config, Arc::new(transport));

    Ok(PortfolioAggregator::new(Arc::new(resolver))
        .with_clock(clock)
        .with_quote_currency(&config.config.quote_currency)
        .build(holdings)
        .await)
}

/// Load holdings and value them against live exchange prices.
pub async fn run(config: &ResolvedConfig) -> Result<PortfolioReport> {
    let holdings = load_holdings(config)?;
    portfolio_report(config, &holdings, Arc::new(SystemClock)).await
}
