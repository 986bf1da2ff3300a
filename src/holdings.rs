//! Holdings loading from config entries and `CRYPTO_<SYMBOL>=<amount>` env vars.
//!
//! Malformed entries are logged and skipped; they never abort a run.

use std::ffi::OsString;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::portfolio::Holding;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HoldingError {
    #[error("invalid amount for {symbol}: {raw:?}")]
    InvalidAmount { symbol: String, raw: String },

    #[error("negative amount for {symbol}: {raw}")]
    NegativeAmount { symbol: String, raw: String },

    #[error("unsupported amount for {symbol}: expected a string or number, got {kind}")]
    UnsupportedValue { symbol: String, kind: &'static str },

    #[error("empty holding symbol")]
    EmptySymbol,
}

/// Parse one `(symbol, amount)` entry. The symbol is lowercased.
pub fn parse_holding(symbol: &str, raw_amount: &str) -> Result<Holding, HoldingError> {
    let symbol = symbol.trim().to_lowercase();
    if symbol.is_empty() {
        return Err(HoldingError::EmptySymbol);
    }

    let raw = raw_amount.trim();
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| HoldingError::InvalidAmount {
            symbol: symbol.clone(),
            raw: raw.to_string(),
        })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(HoldingError::NegativeAmount {
            symbol,
            raw: raw.to_string(),
        });
    }

    Ok(Holding::new(symbol, amount))
}

/// Symbol encoded in an env var name: the segment after `prefix` up to the
/// next `_` (`CRYPTO_BTC_MAIN` -> `btc`).
fn symbol_from_key<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = key.strip_prefix(prefix)?;
    Some(rest.split('_').next().unwrap_or(rest))
}

/// Collect holdings from `(key, value)` pairs whose key starts with `prefix`.
pub fn holdings_from_vars<I, K, V>(vars: I, prefix: &str) -> Vec<Holding>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut holdings = Vec::new();
    for (key, value) in vars {
        let key = key.as_ref();
        let Some(symbol) = symbol_from_key(key, prefix) else {
            continue;
        };
        if symbol.is_empty() {
            warn!(key, "Ignoring holding variable without a symbol");
            continue;
        }

        match parse_holding(symbol, value.as_ref()) {
            Ok(holding) => {
                debug!(symbol = %holding.symbol, amount = %holding.amount, "Loaded holding");
                holdings.push(holding);
            }
            Err(err) => warn!(key, error = %err, "Skipping holding"),
        }
    }
    holdings
}

/// Holdings declared in the process environment.
///
/// Variables that are not valid UTF-8 are ignored; a warning is logged when
/// such a variable carries the holdings prefix.
pub fn holdings_from_env(prefix: &str) -> Vec<Holding> {
    holdings_from_vars(utf8_vars(std::env::vars_os(), prefix), prefix)
}

fn utf8_vars<I>(vars: I, prefix: &str) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.to_str(), value.to_str()) {
            (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
            _ => {
                let key = key.to_string_lossy();
                if key.starts_with(prefix) {
                    warn!(key = %key, "Skipping holding variable that is not valid UTF-8");
                }
                None
            }
        })
        .collect()
}

/// Raw amount text of a config-file holding value.
fn amount_text(symbol: &str, value: &toml::Value) -> Result<String, HoldingError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        other => Err(HoldingError::UnsupportedValue {
            symbol: symbol.trim().to_lowercase(),
            kind: other.type_str(),
        }),
    }
}

/// Collect holdings from config-file entries (`symbol -> amount`).
///
/// Amounts may be TOML strings or numbers; anything else is skipped.
pub fn holdings_from_entries<'a, I, K>(entries: I) -> Vec<Holding>
where
    I: IntoIterator<Item = (K, &'a toml::Value)>,
    K: AsRef<str>,
{
    let mut holdings = Vec::new();
    for (symbol, value) in entries {
        let symbol = symbol.as_ref();
        let parsed = amount_text(symbol, value).and_then(|raw| parse_holding(symbol, &raw));
        match parsed {
            Ok(holding) => holdings.push(holding),
            Err(err) => warn!(symbol = %symbol, error = %err, "Skipping holding"),
        }
    }
    holdings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_scientific_amounts() {
        let holding = parse_holding("BTC", "0.5").unwrap();
        assert_eq!(holding.symbol, "btc");
        assert_eq!(holding.amount, Decimal::new(5, 1));

        let holding = parse_holding("eth", " 1e-3 ").unwrap();
        assert_eq!(holding.amount, Decimal::new(1, 3));
    }

    #[test]
    fn zero_amount_is_kept() {
        let holding = parse_holding("xrp", "0").unwrap();
        assert!(holding.amount.is_zero());
    }

    #[test]
    fn rejects_non_numeric_and_negative_amounts() {
        assert_eq!(
            parse_holding("btc", "lots"),
            Err(HoldingError::InvalidAmount {
                symbol: "btc".to_string(),
                raw: "lots".to_string()
            })
        );
        assert!(matches!(
            parse_holding("btc", "-1"),
            Err(HoldingError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn env_vars_use_segment_after_prefix() {
        let vars = vec![
            ("CRYPTO_BTC", "0.5"),
            ("CRYPTO_ETH_COLD", "2"),
            ("HOME", "/root"),
            ("CRYPTO_DOGE", "many"),
            ("CRYPTO_", "1"),
        ];

        let holdings = holdings_from_vars(vars, "CRYPTO_");
        assert_eq!(
            holdings,
            vec![
                Holding::new("btc", Decimal::new(5, 1)),
                Holding::new("eth", Decimal::from(2)),
            ]
        );
    }

    #[test]
    fn config_entries_skip_bad_amounts() {
        let table: toml::Table = toml::from_str(
            r#"
            ADA = "100"
            sui = "n/a"
            "" = "1"
            eth = 2
            sol = 12.5
            "#,
        )
        .unwrap();

        let holdings = holdings_from_entries(&table);
        assert_eq!(
            holdings,
            vec![
                Holding::new("ada", Decimal::from(100)),
                Holding::new("eth", Decimal::from(2)),
                Holding::new("sol", Decimal::new(125, 1)),
            ]
        );
    }

    #[test]
    fn config_entries_skip_non_numeric_values() {
        let table: toml::Table = toml::from_str(
            r#"
            btc = true
            eth = [1]
            xrp = "300"
            "#,
        )
        .unwrap();

        assert_eq!(
            holdings_from_entries(&table),
            vec![Holding::new("xrp", Decimal::from(300))]
        );
        assert_eq!(
            amount_text("BTC", &toml::Value::Boolean(true)),
            Err(HoldingError::UnsupportedValue {
                symbol: "btc".to_string(),
                kind: "boolean",
            })
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_env_vars_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let vars = vec![
            (
                OsString::from("SPOTBOOK_UTF8_TEST_BTC"),
                OsString::from("0.25"),
            ),
            (
                OsString::from("SPOTBOOK_UTF8_TEST_ETH"),
                OsStr::from_bytes(b"\xff\xfe").to_os_string(),
            ),
            (
                OsStr::from_bytes(b"UNRELATED_\xff").to_os_string(),
                OsString::from("1"),
            ),
        ];

        let holdings = holdings_from_vars(
            utf8_vars(vars, "SPOTBOOK_UTF8_TEST_"),
            "SPOTBOOK_UTF8_TEST_",
        );
        assert_eq!(holdings, vec![Holding::new("btc", Decimal::new(25, 2))]);
    }

    #[cfg(unix)]
    #[test]
    fn process_env_with_non_utf8_value_still_loads() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var(
            "SPOTBOOK_ENV_SCAN_STRAY",
            OsStr::from_bytes(b"\xff\xfe"),
        );
        std::env::set_var("SPOTBOOK_ENV_SCAN_ADA", "42");

        let holdings = holdings_from_env("SPOTBOOK_ENV_SCAN_");

        std::env::remove_var("SPOTBOOK_ENV_SCAN_STRAY");
        std::env::remove_var("SPOTBOOK_ENV_SCAN_ADA");
        assert_eq!(holdings, vec![Holding::new("ada", Decimal::from(42))]);
    }

    #[test]
    fn custom_prefix() {
        let holdings = holdings_from_vars(vec![("COIN_SOL", "10"), ("CRYPTO_BTC", "1")], "COIN_");
        assert_eq!(holdings, vec![Holding::new("sol", Decimal::from(10))]);
    }
}
