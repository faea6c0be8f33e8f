//! Aggregation run orchestration.
//!
//! Scans every registered adapter one after another, concatenates their
//! listings in registration order, then hands the combined sequence to
//! [`aggregate`]. A failing adapter contributes nothing and is reported;
//! it never aborts the run.

use crate::aggregate::{aggregate, Aggregation, AggregationSummary};
use crate::feed::ParsedFeed;
use crate::models::RawListing;
use crate::traits::AdapterRegistry;

/// What one adapter contributed to a run.
#[derive(Debug, Clone)]
pub struct AdapterOutcome {
    pub label: String,
    pub listings: usize,
    /// Rows the adapter reached but could not read.
    pub skipped: usize,
    pub error: Option<String>,
}

impl AdapterOutcome {
    /// Failed, or answered with no rows at all. An adapter whose rows were
    /// all unreadable was still reached and is not unavailable.
    pub fn is_unavailable(&self) -> bool {
        self.error.is_some() || (self.listings == 0 && self.skipped == 0)
    }
}

/// Listings gathered from all adapters, plus per-adapter outcomes.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub listings: Vec<RawListing>,
    pub outcomes: Vec<AdapterOutcome>,
}

pub async fn collect_listings(registry: &AdapterRegistry) -> Collected {
    let mut collected = Collected::default();

    for adapter in registry.adapters() {
        let label = adapter.label();
        match adapter.scan_feed().await {
            Ok(ParsedFeed {
                mut listings,
                skipped,
            }) => {
                tracing::info!(
                    adapter = %label,
                    listings = listings.len(),
                    skipped,
                    "scanned adapter"
                );
                collected.outcomes.push(AdapterOutcome {
                    label,
                    listings: listings.len(),
                    skipped,
                    error: None,
                });
                collected.listings.append(&mut listings);
            }
            Err(e) => {
                let error = format!("{:#}", e);
                tracing::warn!(adapter = %label, %error, "adapter unavailable");
                collected.outcomes.push(AdapterOutcome {
                    label,
                    listings: 0,
                    skipped: 0,
                    error: Some(error),
                });
            }
        }
    }

    collected
}

/// Collect from every adapter and aggregate the result.
///
/// The summary's `unavailable_adapters` lists adapters that failed or
/// answered with no rows; `feed_rows_skipped` totals unreadable rows.
pub async fn run_aggregation(registry: &AdapterRegistry) -> (Aggregation, Vec<AdapterOutcome>) {
    let Collected { listings, outcomes } = collect_listings(registry).await;

    let mut aggregation = aggregate(listings);
    aggregation.summary.feed_rows_skipped = outcomes.iter().map(|o| o.skipped).sum();
    aggregation.summary.unavailable_adapters = outcomes
        .iter()
        .filter(|o| o.is_unavailable())
        .map(|o| o.label.clone())
        .collect();

    tracing::info!(
        records = aggregation.catalog.len(),
        rejected = aggregation.summary.rejected,
        skipped = aggregation.summary.feed_rows_skipped,
        unclassified = aggregation.summary.unclassified,
        merged = aggregation.summary.duplicates_merged,
        unavailable = aggregation.summary.unavailable_adapters.len(),
        "aggregation run finished"
    );

    (aggregation, outcomes)
}

/// Print a one-line run summary to stderr, followed by any rejections and
/// unavailable adapters.
pub fn print_summary(summary: &AggregationSummary) {
    eprintln!(
        "aggregated {} listings: {} accepted, {} rejected, {} merged, {} unclassified",
        summary.input_listings,
        summary.accepted,
        summary.rejected,
        summary.duplicates_merged,
        summary.unclassified
    );
    if summary.feed_rows_skipped > 0 {
        eprintln!(
            "  skipped {} unreadable feed rows",
            summary.feed_rows_skipped
        );
    }
    for r in &summary.rejections {
        eprintln!(
            "  rejected #{} {:?} ({}): {}",
            r.index, r.product_name, r.retailer, r.reason
        );
    }
    if !summary.unavailable_adapters.is_empty() {
        eprintln!(
            "  unavailable adapters: {}",
            summary.unavailable_adapters.join(", ")
        );
    }
}
