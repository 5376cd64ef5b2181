//! Configuration settings for tickertape.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix, e.g. `TICKERTAPE__UI__REFRESH_INTERVAL_SECS=10`.
const ENV_PREFIX: &str = "TICKERTAPE";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quote source configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Watchlist persistence.
    pub watchlist: WatchlistConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from a TOML file layered with environment overrides.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        let settings = config::Config::builder()
            .add_source(
                config::File::from(config_path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn default_path() -> PathBuf {
        super::config_dir()
            .map(|p| p.join("config.toml"))
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }

    /// Resolve where the watchlist file lives.
    pub fn watchlist_path(&self) -> PathBuf {
        self.watchlist.path.clone().unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("watchlist.toml"))
                .unwrap_or_else(|_| PathBuf::from("watchlist.toml"))
        })
    }
}

/// Which upstream quote provider to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Yahoo Finance stock quotes; symbols are exchange tickers.
    #[default]
    Yahoo,
    /// CoinGecko crypto markets; symbols are coin ids.
    CoinGecko,
}

impl Provider {
    /// Default API root for the provider.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Yahoo => "https://query1.finance.yahoo.com",
            Self::CoinGecko => "https://api.coingecko.com/api/v3",
        }
    }
}

/// Quote source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Upstream provider.
    pub provider: Provider,
    /// Override for the provider's API root.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Yahoo,
            base_url: None,
            timeout_secs: 10,
            user_agent: format!("tickertape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// API root with any trailing slash removed.
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI redraws.
    pub tick_rate_ms: u64,
    /// Minimum seconds between scheduled refreshes.
    pub refresh_interval_secs: u64,
    /// Enable mouse wheel scrolling.
    pub mouse_support: bool,
    /// Show status bar.
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            refresh_interval_secs: 5,
            mouse_support: true,
            show_status_bar: true,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Watchlist persistence configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistConfig {
    /// Path of the watchlist file. Defaults to `watchlist.toml` in the config directory.
    pub path: Option<PathBuf>,
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Second quit binding.
    pub quit_alt: String,
    /// Refresh immediately.
    pub refresh: String,
    /// Open the add-symbols prompt.
    pub add: String,
    /// Open the remove-symbols prompt.
    pub remove: String,
    /// Show help.
    pub help: String,
    /// Move selection up.
    pub up: String,
    /// Move selection down.
    pub down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            quit_alt: "Esc".to_string(),
            refresh: "u".to_string(),
            add: "a".to_string(),
            remove: "r".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
        }
    }
}

/// Theme configuration. Colors are names (`green`) or hex (`#db7093`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Header row background.
    pub header_bg: String,
    /// Rows whose change is positive.
    pub gain: String,
    /// Rows whose change is negative.
    pub loss: String,
    /// Borders, prompt labels, key hints.
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            header_bg: "#db7093".to_string(),
            gain: "green".to_string(),
            loss: "red".to_string(),
            accent: "cyan".to_string(),
        }
    }
}
