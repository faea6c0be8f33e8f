use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::query::SortOrder;
use crate::taxonomy::{ProductCategory, RetailerId};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    /// Categories searched when the CLI names none. Empty means all.
    #[serde(default)]
    pub default_categories: Vec<String>,
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_categories: Vec::new(),
            default_sort: default_sort(),
        }
    }
}

fn default_sort() -> String {
    "discount".to_string()
}

impl QueryConfig {
    pub fn categories(&self) -> Result<Vec<ProductCategory>> {
        self.default_categories
            .iter()
            .map(|c| c.parse::<ProductCategory>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()
            .context("query.default_categories")
    }

    pub fn sort(&self) -> Result<SortOrder> {
        self.default_sort
            .parse::<SortOrder>()
            .map_err(anyhow::Error::msg)
            .context("query.default_sort")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConnectorsConfig {
    #[serde(default)]
    pub sample: SampleConnectorConfig,
    #[serde(default)]
    pub file: BTreeMap<String, FileConnectorConfig>,
    #[serde(default)]
    pub http: BTreeMap<String, HttpConnectorConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SampleConnectorConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileConnectorConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Retailer for records that don't name one.
    #[serde(default)]
    pub retailer: Option<String>,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConnectorConfig {
    pub url: String,
    #[serde(default)]
    pub retailer: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Parse an optional configured retailer name.
pub fn parse_retailer(raw: Option<&str>) -> Result<Option<RetailerId>> {
    raw.map(|r| r.parse::<RetailerId>().map_err(anyhow::Error::msg))
        .transpose()
}

impl Config {
    /// Configuration used when no config file exists: built-in sample
    /// listings only.
    pub fn minimal() -> Self {
        let mut config = Self::default();
        config.connectors.sample.enabled = true;
        config
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    config.query.categories()?;
    config.query.sort()?;

    for (name, fs) in &config.connectors.file {
        if fs.include_globs.is_empty() {
            anyhow::bail!("connectors.file.{}.include_globs must not be empty", name);
        }
        parse_retailer(fs.retailer.as_deref())
            .with_context(|| format!("connectors.file.{}.retailer", name))?;
    }

    for (name, http) in &config.connectors.http {
        if http.timeout_secs == 0 {
            anyhow::bail!("connectors.http.{}.timeout_secs must be > 0", name);
        }
        if !(http.url.starts_with("http://") || http.url.starts_with("https://")) {
            anyhow::bail!(
                "connectors.http.{}.url must start with http:// or https://",
                name
            );
        }
        parse_retailer(http.retailer.as_deref())
            .with_context(|| format!("connectors.http.{}.retailer", name))?;
    }

    Ok(())
}
