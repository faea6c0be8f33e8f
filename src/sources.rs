//! Adapter configuration and health listing.
//!
//! | Adapter | Healthy When |
//! |---------|-------------|
//! | `sample` | Always |
//! | `file` | Configured root directory exists |
//! | `http` | URL is http(s); reachability is only checked at scan time |

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    /// Adapter label (e.g. `"file:newegg"`).
    pub name: String,
    pub configured: bool,
    pub healthy: bool,
    pub notes: Option<String>,
}

pub fn get_sources(config: &Config) -> Vec<SourceStatus> {
    let mut sources = Vec::new();

    sources.push(SourceStatus {
        name: "sample:builtin".to_string(),
        configured: config.connectors.sample.enabled,
        healthy: true,
        notes: Some("built-in demonstration deals".to_string()),
    });

    for (name, fs_config) in &config.connectors.file {
        let exists = fs_config.root.exists();
        sources.push(SourceStatus {
            name: format!("file:{}", name),
            configured: true,
            healthy: exists,
            notes: if exists {
                Some(format!("root: {}", fs_config.root.display()))
            } else {
                Some("root directory does not exist".to_string())
            },
        });
    }

    for (name, http_config) in &config.connectors.http {
        let valid = http_config.url.starts_with("http://") || http_config.url.starts_with("https://");
        sources.push(SourceStatus {
            name: format!("http:{}", name),
            configured: true,
            healthy: valid,
            notes: Some(format!("url: {}", http_config.url)),
        });
    }

    sources
}

/// Print the adapter table, or the statuses as a JSON array when `json` is
/// set.
pub fn list_sources(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&get_sources(config))?);
        return Ok(());
    }

    println!("{:<24} {:<12} {:<8} NOTES", "ADAPTER", "CONFIGURED", "HEALTHY");
    for s in get_sources(config) {
        println!(
            "{:<24} {:<12} {:<8} {}",
            s.name,
            s.configured,
            s.healthy,
            s.notes.unwrap_or_default()
        );
    }
    Ok(())
}
