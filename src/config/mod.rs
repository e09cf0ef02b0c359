//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::{
    CliArgs, Command, DeleteArgs, GlobalOverrides, ListArgs, OutputArgs, ProductFieldArgs,
    UpdateArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "stockroom";
const DEFAULT_CATALOG_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_CATALOG_DELAY_MS: u64 = 1000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LISTING_FRESH_SECS: u64 = 5 * 60;
const DEFAULT_CATEGORIES_FRESH_SECS: u64 = 10 * 60;
const DEFAULT_LISTING_LIMIT: usize = 50;
const DEFAULT_READ_RETRIES: u32 = 1;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub cache: CacheSettings,
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: Url,
    pub delay_ms: u64,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub listing_fresh_for: Duration,
    pub categories_fresh_for: Duration,
    pub listing_limit: NonZeroUsize,
    pub read_retries: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub search_debounce: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("STOCKROOM").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    catalog: RawCatalogSettings,
    cache: RawCacheSettings,
    dashboard: RawDashboardSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_base_url.as_ref() {
            self.catalog.base_url = Some(url.clone());
        }
        if let Some(delay) = overrides.catalog_delay_ms {
            self.catalog.delay_ms = Some(delay);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            catalog: build_catalog_settings(raw.catalog)?,
            cache: build_cache_settings(raw.cache)?,
            dashboard: build_dashboard_settings(raw.dashboard)?,
            logging: build_logging_settings(raw.logging)?,
        })
    }
}

fn build_catalog_settings(catalog: RawCatalogSettings) -> Result<CatalogSettings, LoadError> {
    let raw_url = catalog
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("catalog.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "catalog.base_url",
            "scheme must be http or https",
        ));
    }

    let timeout_secs = catalog
        .request_timeout_seconds
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "catalog.request_timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(CatalogSettings {
        base_url,
        delay_ms: catalog.delay_ms.unwrap_or(DEFAULT_CATALOG_DELAY_MS),
        request_timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let listing_limit = cache.listing_limit.unwrap_or(DEFAULT_LISTING_LIMIT);
    let listing_limit = NonZeroUsize::new(listing_limit)
        .ok_or_else(|| LoadError::invalid("cache.listing_limit", "must be greater than zero"))?;

    Ok(CacheSettings {
        listing_fresh_for: Duration::from_secs(
            cache
                .listing_fresh_seconds
                .unwrap_or(DEFAULT_LISTING_FRESH_SECS),
        ),
        categories_fresh_for: Duration::from_secs(
            cache
                .categories_fresh_seconds
                .unwrap_or(DEFAULT_CATEGORIES_FRESH_SECS),
        ),
        listing_limit,
        read_retries: cache.read_retries.unwrap_or(DEFAULT_READ_RETRIES),
        retry_delay: Duration::from_millis(cache.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
    })
}

fn build_dashboard_settings(
    dashboard: RawDashboardSettings,
) -> Result<DashboardSettings, LoadError> {
    let debounce_ms = dashboard
        .search_debounce_ms
        .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);
    if debounce_ms == 0 {
        return Err(LoadError::invalid(
            "dashboard.search_debounce_ms",
            "must be greater than zero",
        ));
    }

    Ok(DashboardSettings {
        search_debounce: Duration::from_millis(debounce_ms),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCatalogSettings {
    base_url: Option<String>,
    delay_ms: Option<u64>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    listing_fresh_seconds: Option<u64>,
    categories_fresh_seconds: Option<u64>,
    listing_limit: Option<usize>,
    read_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDashboardSettings {
    search_debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
