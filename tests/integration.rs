use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn deals_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_deals"))
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let feeds_dir = root.join("feeds");
    fs::create_dir_all(&feeds_dir).unwrap();
    fs::write(
        feeds_dir.join("amazon.json"),
        r#"[
  {"product_name": "RTX 4070", "category": "GPU", "list_price": 599.99, "sale_price": 479.99,
   "source_url": "https://amazon.example/rtx4070"},
  {"product_name": "Broken Listing", "category": "GPU", "list_price": 500, "sale_price": 600}
]"#,
    )
    .unwrap();
    fs::write(
        feeds_dir.join("newegg.json"),
        r#"[
  {"product_name": "Ryzen 7", "category": "processor", "retailer": "Newegg",
   "list_price": 349.99, "sale_price": 299.99},
  {"product_name": "rtx  4070", "category": "graphics card", "retailer": "Newegg",
   "list_price": 599.99, "sale_price": 499.99}
]"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[query]
default_sort = "discount"

[connectors.file.feeds]
root = "{}/feeds"
retailer = "Amazon"
"#,
        root.display()
    );

    let config_path = config_dir.join("deals.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_deals(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = deals_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run deals binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_sources_lists_file_adapter() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_deals(&config_path, &["sources"]);
    assert!(success, "sources failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("file:feeds"));
    assert!(stdout.contains("sample:builtin"));
}

#[test]
fn test_categories_lists_taxonomy() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_deals(&config_path, &["categories"]);
    assert!(success);
    assert!(stdout.contains("Power Supply"));
    assert!(stdout.lines().last().unwrap_or_default().contains("Unclassified"));
}

#[test]
fn test_search_filters_and_sorts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_deals(&config_path, &["search", "--min-discount", "15"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Found 2 Deals"), "got: {}", stdout);

    let amazon = stdout.find("Retailer: Amazon").unwrap();
    let newegg = stdout.find("Retailer: Newegg").unwrap();
    assert!(amazon < newegg, "expected Amazon (20.0%) before Newegg (16.7%)");
    assert!(stdout.contains("Discount: 20.0% OFF"));
    assert!(!stdout.contains("Ryzen 7"));

    assert!(stderr.contains("1 rejected"), "stderr: {}", stderr);
}

#[test]
fn test_search_with_no_matches() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_deals(&config_path, &["search", "--max-price", "-1"]);
    assert!(success);
    assert!(stdout.contains("No deals found."));
}

#[test]
fn test_export_to_file() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("out/nested/deals.json");

    let (stdout, stderr, success) = run_deals(
        &config_path,
        &[
            "export",
            "--category",
            "GPU",
            "--sort",
            "price",
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(success, "export failed: stdout={}, stderr={}", stdout, stderr);

    let text = fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["retailer"], "Amazon");
    assert_eq!(rows[0]["salePrice"].as_f64(), Some(479.99));
    assert_eq!(rows[0]["sourceUrl"], "https://amazon.example/rtx4070");
    assert_eq!(rows[1]["retailer"], "Newegg");
    assert_eq!(rows[1]["discountPercent"].as_f64(), Some(16.7));
}

#[test]
fn test_export_deterministic() {
    let (_tmp, config_path) = setup_test_env();

    let (first, _, ok1) = run_deals(&config_path, &["export"]);
    let (second, _, ok2) = run_deals(&config_path, &["export"]);
    assert!(ok1 && ok2);
    assert_eq!(first, second);
}

#[test]
fn test_missing_config_falls_back_to_sample_deals() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let (stdout, _, success) = run_deals(&missing, &["search", "--sort", "price"]);
    assert!(success);
    assert!(stdout.contains("Found 4 Deals"));
    assert!(stdout.contains("AMD Ryzen 9 5900X"));
}

#[test]
fn test_stats_reports_counts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_deals(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Deals:       3"), "got: {}", stdout);
    assert!(stdout.contains("Rejected:    1"));
}

#[test]
fn test_stats_json_includes_summary() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_deals(&config_path, &["stats", "--json"]);
    assert!(success, "stats failed: stdout={}, stderr={}", stdout, stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["adapters"], 1);
    assert_eq!(report["stats"]["total"], 3);
    assert_eq!(report["summary"]["rejected"], 1);
    assert_eq!(report["summary"]["feed_rows_skipped"], 0);
    assert_eq!(report["summary"]["rejections"][0]["product_name"], "Broken Listing");
    assert_eq!(
        report["summary"]["rejections"][0]["reason"],
        "sale price exceeds list price"
    );
}

#[test]
fn test_sources_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_deals(&config_path, &["sources", "--json"]);
    assert!(success);
    let sources: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let names: Vec<&str> = sources
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["sample:builtin", "file:feeds"]);
    assert_eq!(sources[1]["healthy"], true);
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[query]\ndefault_sort = \"alphabetical\"\n").unwrap();

    let (_, stderr, success) = run_deals(&config_path, &["search"]);
    assert!(!success);
    assert!(stderr.contains("default_sort"), "stderr: {}", stderr);
}
