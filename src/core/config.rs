//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! The config file is optional and only ever read. It lives at
//! `~/.wikiterm/config.toml`; without it the defaults apply and the program
//! runs with no arguments at all.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct WikitermConfig {
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct WikipediaConfig {
    pub language: Option<String>,
    pub api_url: Option<String>,
    pub article_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UiConfig {
    pub tick_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// 20 polls per second.
pub const DEFAULT_TICK_MS: u64 = 50;

fn default_user_agent() -> String {
    format!(
        "wikiterm/{} (terminal encyclopedia reader)",
        env!("CARGO_PKG_VERSION")
    )
}

fn api_url_for(language: &str) -> String {
    format!("https://{language}.wikipedia.org/w/api.php")
}

fn article_url_for(language: &str) -> String {
    format!("https://{language}.wikipedia.org/wiki/")
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub language: String,
    pub api_url: String,
    pub article_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub tick_ms: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.wikiterm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wikiterm").join("config.toml"))
}

/// Load config from `~/.wikiterm/config.toml`.
///
/// A missing file (or home directory) yields `WikitermConfig::default()`.
/// A malformed file is an error.
pub fn load_config() -> Result<WikitermConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(WikitermConfig::default());
    };

    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(WikitermConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<WikitermConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WikitermConfig, cli_language: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_language, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an explicit environment lookup.
pub fn resolve_with_env(
    config: &WikitermConfig,
    cli_language: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Language: CLI → env → config → default
    let language = cli_language
        .map(str::to_string)
        .or_else(|| env("WIKITERM_LANG"))
        .or_else(|| config.wikipedia.language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    // Explicit URLs win over the ones derived from the language
    let api_url = env("WIKITERM_API_URL")
        .or_else(|| config.wikipedia.api_url.clone())
        .unwrap_or_else(|| api_url_for(&language));

    let article_url = config
        .wikipedia
        .article_url
        .clone()
        .unwrap_or_else(|| article_url_for(&language));

    ResolvedConfig {
        api_url,
        article_url,
        timeout_secs: config
            .wikipedia
            .timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
        user_agent: config
            .wikipedia
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent),
        tick_ms: config.ui.tick_ms.unwrap_or(DEFAULT_TICK_MS).max(1),
        language,
    }
}
