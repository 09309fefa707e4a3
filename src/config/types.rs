use crate::locator::LocatorScheme;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub scraping: ScrapingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
}

/// Documentation site location
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL every page locator is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Locator of the class listing page
    #[serde(rename = "listing-page", default = "default_listing_page")]
    pub listing_page: String,
}

/// Request behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapingConfig {
    /// Pause after every successful fetch (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Base of the exponential retry backoff (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl ScrapingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "base-dir", default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Per-entity Markdown files
    #[serde(rename = "classes-dir", default = "default_classes_dir")]
    pub classes_dir: PathBuf,

    /// Per-entity JSON files
    #[serde(rename = "json-dir", default = "default_json_dir")]
    pub json_dir: PathBuf,

    /// Cached entity list (JSON)
    #[serde(rename = "entity-cache", default = "default_entity_cache")]
    pub entity_cache: PathBuf,

    /// Crawl progress (CSV)
    #[serde(rename = "progress-file", default = "default_progress_file")]
    pub progress_file: PathBuf,
}

impl OutputConfig {
    /// Path of the generated index page
    pub fn index_path(&self) -> PathBuf {
        self.base_dir.join("index.md")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            classes_dir: default_classes_dir(),
            json_dir: default_json_dir(),
            entity_cache: default_entity_cache(),
            progress_file: default_progress_file(),
        }
    }
}

/// Overrides for the locator encoding; unset keys keep Doxygen's defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocatorConfig {
    #[serde(rename = "namespace-token")]
    pub namespace_token: Option<String>,

    pub extension: Option<String>,
}

impl LocatorConfig {
    pub fn scheme(&self) -> LocatorScheme {
        let mut scheme = LocatorScheme::default();
        if let Some(token) = &self.namespace_token {
            scheme.namespace_token = token.clone();
        }
        if let Some(extension) = &self.extension {
            scheme.extension = extension.clone();
        }
        scheme
    }
}

fn default_listing_page() -> String {
    "annotated.html".to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_user_agent() -> String {
    format!("doxygen-harvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_classes_dir() -> PathBuf {
    PathBuf::from("output/classes")
}

fn default_json_dir() -> PathBuf {
    PathBuf::from("output/json")
}

fn default_entity_cache() -> PathBuf {
    PathBuf::from("output/class_list.json")
}

fn default_progress_file() -> PathBuf {
    PathBuf::from("output/progress.csv")
}
