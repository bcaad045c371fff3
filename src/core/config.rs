use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, net::SocketAddr, path::PathBuf};
use tracing::debug;

/// Environment variable that overrides `providers.news.api_key`.
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com";
pub const DEFAULT_NEWS_URL: &str = "https://newsdata.io";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewsProviderConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: ExchangeRateProviderConfig,
    #[serde(default = "default_news")]
    pub news: NewsProviderConfig,
}

fn default_exchange_rate() -> ExchangeRateProviderConfig {
    ExchangeRateProviderConfig {
        base_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
    }
}

fn default_news() -> NewsProviderConfig {
    NewsProviderConfig {
        base_url: DEFAULT_NEWS_URL.to_string(),
        api_key: None,
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate: default_exchange_rate(),
            news: default_news(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "expense-tracker", "expense-tracker")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "expense-tracker", "expense-tracker")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies the `NEWS_API_KEY` value, if any, over the file setting.
    pub fn with_news_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            debug!("Using news API key from {}", NEWS_API_KEY_ENV);
            self.providers.news.api_key = Some(key);
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        let key = std::env::var(NEWS_API_KEY_ENV).ok();
        self.with_news_api_key(key)
    }
}
