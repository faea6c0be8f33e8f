//! `deals search`: aggregate, query, and print deals for a human reader.

use anyhow::Result;

use crate::config::Config;
use crate::ingest::{print_summary, run_aggregation};
use crate::query::DealQuery;
use crate::traits::AdapterRegistry;

pub async fn run_search(config: &Config, query: &DealQuery, limit: Option<usize>) -> Result<()> {
    let registry = AdapterRegistry::from_config(config);
    if registry.is_empty() {
        eprintln!("No adapters configured. Add [connectors] entries to the config file.");
    }

    let (aggregation, _) = run_aggregation(&registry).await;
    print_summary(&aggregation.summary);

    let view = query.apply(&aggregation.catalog);
    if view.is_empty() {
        println!("No deals found.");
        return Ok(());
    }

    let shown = limit.unwrap_or(view.len()).min(view.len());
    let rule = "=".repeat(80);

    println!("{}", rule);
    if shown < view.len() {
        println!("Found {} Deals (showing {}):", view.len(), shown);
    } else {
        println!("Found {} Deals:", view.len());
    }
    println!("{}", rule);
    println!();

    for (i, deal) in view.iter().take(shown).enumerate() {
        println!("Deal #{}:", i + 1);
        println!("{}", deal);
        println!("{}", "-".repeat(80));
    }

    Ok(())
}
