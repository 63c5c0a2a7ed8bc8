use std::path::Path;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub ranking: RankingConfig,
    pub sources: Vec<SourceConfig>,
    pub http: HttpConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub welcome_message: Vec<String>,
    pub info_message: String,
    pub reply_header: String,
}

impl BotConfig {
    pub fn welcome_text(&self) -> String {
        self.welcome_message.join("\n\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    pub min_liquidity: Decimal,
    pub top_n: usize,
    pub quote_marker: String,
    pub page: u32,
    pub limit: u32,
    pub sort_key: String,
    pub order_by: String,
}

/// One upstream pair API endpoint. List order matters: later sources win
/// the provenance tag for addresses they share with earlier ones.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub api_base: String,
    pub domain: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

/// Secrets loaded exclusively from environment variables.
/// Not serializable, not stored in config files.
pub struct Secrets {
    pub bot_token: SecretString,
}

impl Secrets {
    /// Read the bot credential from `TOKEN`, falling back to `TELOXIDE_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("TOKEN")
            .or_else(|_| std::env::var("TELOXIDE_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty())
            .context("Bot token missing: set TOKEN (or TELOXIDE_TOKEN) in the environment")?;

        Ok(Self {
            bot_token: SecretString::from(token),
        })
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, overlaying environment variables for secrets.
    pub fn load(config_path: &Path) -> Result<(Self, Secrets)> {
        dotenvy::dotenv().ok();

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        let secrets = Secrets::from_env()?;

        Ok((config, secrets))
    }

    /// Parse and validate a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("At least one [[sources]] entry is required");
        }
        for source in &self.sources {
            if source.name.trim().is_empty()
                || source.api_base.trim().is_empty()
                || source.domain.trim().is_empty()
            {
                bail!("Source entries need a non-empty name, api_base and domain");
            }
        }
        if self.ranking.top_n == 0 {
            bail!("ranking.top_n must be at least 1");
        }
        if self.ranking.min_liquidity.is_sign_negative() {
            bail!("ranking.min_liquidity must not be negative");
        }
        Ok(())
    }
}
