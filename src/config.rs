use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::duration::{deserialize_duration, serialize_duration};
use crate::market_data::SourceEndpoints;

/// File name looked up in the working directory and the XDG config dir.
pub const CONFIG_FILE_NAME: &str = "spotbook.toml";

fn default_quote_currency() -> String {
    "KRW".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_env_prefix() -> String {
    "CRYPTO_".to_string()
}

fn default_env_file() -> Option<PathBuf> {
    Some(PathBuf::from(".env"))
}

/// Display/output formatting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Values are rounded and padded to this many decimal places when set.
    ///
    /// Purely a presentation setting; calculations keep full precision.
    pub currency_decimals: Option<u32>,

    /// Render numbers with thousands separators.
    pub currency_grouping: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_decimals: Some(2),
            currency_grouping: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Currency every source quotes in; also the asset pegged at 1.0.
    pub quote_currency: String,

    /// Per-request transport timeout.
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub request_timeout: Duration,

    /// Env vars starting with this prefix declare holdings.
    pub env_prefix: String,

    /// Dotenv file loaded before scanning the environment. If relative,
    /// resolved from the config file location.
    pub env_file: Option<PathBuf>,

    /// Extra or overriding symbol -> CoinGecko id mappings.
    pub aliases: HashMap<String, String>,

    /// Holdings declared directly in the config file.
    ///
    /// Values stay raw so one malformed entry is skipped at load time
    /// instead of failing the whole file.
    pub holdings: BTreeMap<String, toml::Value>,

    /// Exchange base URLs.
    pub endpoints: SourceEndpoints,

    /// Display/output formatting settings.
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_currency: default_quote_currency(),
            request_timeout: default_request_timeout(),
            env_prefix: default_env_prefix(),
            env_file: default_env_file(),
            aliases: HashMap::new(),
            holdings: BTreeMap::new(),
            endpoints: SourceEndpoints::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn resolve_env_file(&self, config_dir: &Path) -> Option<PathBuf> {
        self.env_file.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                config_dir.join(path)
            }
        })
    }
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,

    /// Dotenv file to load, resolved against the config file's directory.
    pub env_file: Option<PathBuf>,
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./spotbook.toml` if it exists in current directory
/// 2. `~/.config/spotbook/spotbook.toml` (XDG config directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from(CONFIG_FILE_NAME);
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join("spotbook").join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return candidate;
        }
    }

    local_config
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = config_path
            .canonicalize()
            .with_context(|| format!("Config file not found: {}", config_path.display()))?;

        let config_dir = config_path
            .parent()
            .context("Config file has no parent directory")?;

        let config = Config::load(&config_path)?;
        let env_file = config.resolve_env_file(config_dir);

        Ok(Self { config, env_file })
    }

    /// Load config, falling back to defaults if the file doesn't exist.
    ///
    /// Without a file, relative paths resolve from the current directory.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }

        let config = Config::default();
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let env_file = config.resolve_env_file(&cwd);
        Ok(Self { config, env_file })
    }
}
