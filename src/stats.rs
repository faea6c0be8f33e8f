//! Catalog statistics.
//!
//! A quick summary of what one aggregation run produced: totals, per-category
//! and per-retailer breakdowns, the mean discount, and the single best deal.
//! Used by `deals stats`, which prints either a text table or, with
//! `--json`, a [`StatsReport`].

use anyhow::Result;
use serde::Serialize;

use crate::aggregate::AggregationSummary;
use crate::config::Config;
use crate::ingest::run_aggregation;
use crate::models::{Catalog, DealRecord};
use crate::taxonomy::{ProductCategory, RetailerId};
use crate::traits::AdapterRegistry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    /// Taxonomy order; categories with no deals are omitted.
    pub by_category: Vec<(ProductCategory, usize)>,
    /// Registry order; retailers with no deals are omitted.
    pub by_retailer: Vec<(RetailerId, usize)>,
    /// `None` for an empty catalog.
    pub mean_discount: Option<f64>,
    /// Highest discount; ties go to the earlier record.
    pub best_deal: Option<DealSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealSummary {
    pub product_name: String,
    pub retailer: RetailerId,
    pub sale_price: f64,
    pub discount_percent: f64,
}

impl From<&DealRecord> for DealSummary {
    fn from(r: &DealRecord) -> Self {
        Self {
            product_name: r.product_name().to_string(),
            retailer: r.retailer(),
            sale_price: r.sale_price(),
            discount_percent: r.discount_percent(),
        }
    }
}

impl CatalogStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let by_category = ProductCategory::ALL
            .iter()
            .map(|c| (*c, catalog.iter().filter(|r| r.category() == *c).count()))
            .filter(|(_, n)| *n > 0)
            .collect();

        let by_retailer = RetailerId::ALL
            .iter()
            .map(|id| (*id, catalog.iter().filter(|r| r.retailer() == *id).count()))
            .filter(|(_, n)| *n > 0)
            .collect();

        let mean_discount = if catalog.is_empty() {
            None
        } else {
            let sum: f64 = catalog.iter().map(|r| r.discount_percent()).sum();
            Some(sum / catalog.len() as f64)
        };

        let mut best: Option<&DealRecord> = None;
        for r in catalog {
            if best.map_or(true, |b| r.discount_percent() > b.discount_percent()) {
                best = Some(r);
            }
        }

        Self {
            total: catalog.len(),
            by_category,
            by_retailer,
            mean_discount,
            best_deal: best.map(DealSummary::from),
        }
    }
}

/// Machine-readable output of `deals stats --json`.
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    pub aggregated_at: String,
    pub adapters: usize,
    pub stats: &'a CatalogStats,
    pub summary: &'a AggregationSummary,
}

/// Run the stats command: aggregate every adapter and print a summary.
pub async fn run_stats(config: &Config, json: bool) -> Result<()> {
    let registry = AdapterRegistry::from_config(config);
    let (aggregation, _) = run_aggregation(&registry).await;
    let stats = CatalogStats::from_catalog(&aggregation.catalog);
    let summary = &aggregation.summary;
    let aggregated_at = chrono::Local::now();

    if json {
        let report = StatsReport {
            aggregated_at: aggregated_at.to_rfc3339(),
            adapters: registry.len(),
            stats: &stats,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Deal Harness: Catalog Stats");
    println!("============================");
    println!();
    println!("  Aggregated:  {}", aggregated_at.format("%Y-%m-%d %H:%M"));
    println!("  Adapters:    {}", registry.len());
    println!("  Listings:    {}", summary.input_listings);
    println!("  Deals:       {}", stats.total);
    println!("  Rejected:    {}", summary.rejected);
    println!("  Skipped:     {}", summary.feed_rows_skipped);
    println!("  Merged:      {}", summary.duplicates_merged);
    println!("  Unclassified: {}", summary.unclassified);
    if let Some(mean) = stats.mean_discount {
        println!("  Mean discount: {:.1}%", mean);
    }
    if let Some(best) = &stats.best_deal {
        println!(
            "  Best deal:   {} @ {}, ${:.2} ({:.1}% off)",
            best.product_name, best.retailer, best.sale_price, best.discount_percent
        );
    }

    if !stats.by_category.is_empty() {
        println!();
        println!("  By category:");
        for (cat, n) in &stats.by_category {
            println!("  {:<16} {:>6}", cat.label(), n);
        }
    }

    if !stats.by_retailer.is_empty() {
        println!();
        println!("  By retailer:");
        for (id, n) in &stats.by_retailer {
            println!("  {:<16} {:>6}", id.label(), n);
        }
    }

    if !summary.unavailable_adapters.is_empty() {
        println!();
        println!("  Unavailable: {}", summary.unavailable_adapters.join(", "));
    }

    println!();
    Ok(())
}
