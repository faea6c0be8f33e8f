use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::{parse_retailer, FileConnectorConfig};
use crate::feed::{parse_feed, ParsedFeed};
use crate::models::RawListing;
use crate::traits::SourceAdapter;

/// Reads listing feeds from JSON files under a directory.
pub struct FileAdapter {
    name: String,
    config: FileConnectorConfig,
}

impl FileAdapter {
    pub fn new(name: String, config: FileConnectorConfig) -> Self {
        Self { name, config }
    }
}

#[async_trait]
impl SourceAdapter for FileAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Read JSON listing feeds from a local directory"
    }

    fn adapter_type(&self) -> &str {
        "file"
    }

    async fn scan(&self) -> Result<Vec<RawListing>> {
        Ok(scan_files(&self.config)?.listings)
    }

    async fn scan_feed(&self) -> Result<ParsedFeed> {
        scan_files(&self.config)
    }
}

/// Walk `root`, parse every matching file, and concatenate the listings.
///
/// Files are visited in sorted relative-path order so repeated scans yield
/// listings in the same order. A file that is not a valid feed fails the
/// whole scan.
pub fn scan_files(fs_config: &FileConnectorConfig) -> Result<ParsedFeed> {
    let root = &fs_config.root;
    if !root.exists() {
        bail!("File adapter root does not exist: {}", root.display());
    }

    let default_retailer = parse_retailer(fs_config.retailer.as_deref())?;
    let include_set = build_globset(&fs_config.include_globs)?;
    let exclude_set = build_globset(&fs_config.exclude_globs)?;

    let mut paths = Vec::new();
    let walker = WalkDir::new(root).follow_links(fs_config.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }
        paths.push((rel_str, path.to_path_buf()));
    }

    paths.sort_by(|a, b| a.0.cmp(&b.0));

    let mut feed = ParsedFeed::default();
    for (rel_str, path) in paths {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read feed: {}", path.display()))?;
        let parsed = parse_feed(&text, default_retailer, &rel_str)?;
        tracing::debug!(
            file = %rel_str,
            listings = parsed.listings.len(),
            skipped = parsed.skipped,
            "read feed file"
        );
        feed.append(parsed);
    }

    Ok(feed)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::RetailerId;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> FileConnectorConfig {
        FileConnectorConfig {
            root: root.to_path_buf(),
            include_globs: vec!["**/*.json".to_string()],
            exclude_globs: vec!["**/skip/**".to_string()],
            follow_symlinks: false,
            retailer: Some("Micro Center".to_string()),
        }
    }

    #[test]
    fn test_scans_matching_files_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("nested")).unwrap();
        fs::create_dir_all(tmp.path().join("skip")).unwrap();
        fs::write(
            tmp.path().join("b.json"),
            r#"[{"product_name":"B","category":"RAM","list_price":100,"sale_price":80}]"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("nested/a.json"),
            r#"[{"product_name":"A","category":"SSD","retailer":"Amazon","list_price":90,"sale_price":60}]"#,
        )
        .unwrap();
        fs::write(tmp.path().join("skip/c.json"), "[]").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let listings = scan_files(&config(tmp.path())).unwrap().listings;
        let names: Vec<_> = listings.iter().map(|l| l.product_name_raw.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(listings[0].retailer, RetailerId::MicroCenter);
        assert_eq!(listings[1].retailer, RetailerId::Amazon);
    }

    #[test]
    fn test_unreadable_rows_are_counted() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("f.json"),
            r#"[
  {"product_name":"TV","category":"TV","retailer":"Costco","list_price":500,"sale_price":400},
  {"product_name":"GPU","category":"GPU","list_price":"500","sale_price":400}
]"#,
        )
        .unwrap();

        let feed = scan_files(&config(tmp.path())).unwrap();
        assert!(feed.listings.is_empty());
        assert_eq!(feed.skipped, 2);
    }

    #[test]
    fn test_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_files(&config(&tmp.path().join("missing"))).is_err());
    }

    #[test]
    fn test_invalid_feed_fails_scan() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.json"), "{ nope").unwrap();
        assert!(scan_files(&config(tmp.path())).is_err());
    }
}
