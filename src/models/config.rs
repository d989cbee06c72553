//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::CONFIDENCE_FLOOR;

/// Prefix of environment variables that override file settings,
/// e.g. `MONK_CRAWLER__END_PAGE=3`.
pub const ENV_PREFIX: &str = "MONK";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
/// Top-level configuration shared by the crawl and chat commands.
pub struct AppConfig {
    pub snapshot_path: String,
    pub crawler: CrawlerConfig,
    pub matcher: MatcherConfig,
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "monk_data.json".to_string(),
            crawler: CrawlerConfig::default(),
            matcher: MatcherConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path` (optional, format picked from its extension) and applies
    /// `MONK_*` environment overrides on top.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub base_url: String,
    pub archive_path: String,
    pub page_param: String,
    pub start_page: u32,
    pub end_page: u32,
    /// Links are followed only when their host equals or is a subdomain of this.
    pub domain_suffix: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub request_delay_ms: u64,
    pub heading_selector: String,
    pub paragraph_selector: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.marketingmonk.so/".to_string(),
            archive_path: "archive".to_string(),
            page_param: "page".to_string(),
            start_page: 1,
            end_page: 11,
            domain_suffix: "marketingmonk.so".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 30,
            request_delay_ms: 0,
            heading_selector: "h2".to_string(),
            paragraph_selector: "p".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub confidence_floor: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_floor: CONFIDENCE_FLOOR,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-pro".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_secs: 60,
        }
    }
}
