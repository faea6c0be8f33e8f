//! The aggregator: raw listings in, one consistent catalog out.
//!
//! Each raw listing is validated, classified, keyed, and merged in input
//! order. Malformed listings are skipped and counted; they never abort the
//! run. Same-retailer duplicates keep the lower sale price, with the
//! first-seen record winning ties and keeping its position.
//!
//! [`aggregate`] holds no state between calls: the same input in the same
//! order always produces an identical catalog.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::RejectReason;
use crate::models::{Catalog, DealRecord, RawListing};
use crate::taxonomy::{ProductCategory, RetailerId};

/// A listing the aggregator refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// Zero-based position in the input sequence.
    pub index: usize,
    pub product_name: String,
    pub retailer: RetailerId,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RejectReason,
}

fn serialize_reason<S: serde::Serializer>(reason: &RejectReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

/// Counts describing one aggregation run.
///
/// An empty catalog with `input_listings == 0`, `feed_rows_skipped == 0`
/// and non-empty `unavailable_adapters` means the sources were down, not
/// that there were no deals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationSummary {
    pub input_listings: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejections: Vec<Rejection>,
    pub unclassified: usize,
    pub duplicates_merged: usize,
    /// Feed rows adapters reached but could not read (unknown retailer,
    /// unparsable price). They never become listings. Filled in by
    /// [`run_aggregation`](crate::ingest::run_aggregation).
    pub feed_rows_skipped: usize,
    /// Labels of adapters that failed, or answered with no rows at all.
    /// Filled in by [`run_aggregation`](crate::ingest::run_aggregation).
    pub unavailable_adapters: Vec<String>,
}

/// Result of [`aggregate`]: the catalog plus its run summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub catalog: Catalog,
    pub summary: AggregationSummary,
}

/// Merge raw listings into a catalog.
pub fn aggregate<I>(raw_listings: I) -> Aggregation
where
    I: IntoIterator<Item = RawListing>,
{
    let mut records: Vec<DealRecord> = Vec::new();
    let mut slots: HashMap<(String, RetailerId), usize> = HashMap::new();
    let mut summary = AggregationSummary::default();

    for (index, raw) in raw_listings.into_iter().enumerate() {
        summary.input_listings += 1;

        let category = match ProductCategory::lookup(&raw.category_raw) {
            Some(cat) => cat,
            None => {
                tracing::debug!(
                    category = %raw.category_raw,
                    product = %raw.product_name_raw,
                    "unmapped category, using Unclassified"
                );
                ProductCategory::Unclassified
            }
        };

        let record = match DealRecord::new(
            &raw.product_name_raw,
            category,
            raw.retailer,
            raw.list_price,
            raw.sale_price,
            raw.source_url,
        ) {
            Ok(record) => record,
            Err(reason) => {
                tracing::debug!(index, product = %raw.product_name_raw, %reason, "rejected listing");
                summary.rejected += 1;
                summary.rejections.push(Rejection {
                    index,
                    product_name: raw.product_name_raw,
                    retailer: raw.retailer,
                    reason,
                });
                continue;
            }
        };

        summary.accepted += 1;
        if category == ProductCategory::Unclassified {
            summary.unclassified += 1;
        }

        let key = (record.identity_key().to_string(), record.retailer());
        match slots.get(&key) {
            Some(&slot) => {
                summary.duplicates_merged += 1;
                if record.sale_price() < records[slot].sale_price() {
                    records[slot] = record;
                }
            }
            None => {
                slots.insert(key, records.len());
                records.push(record);
            }
        }
    }

    tracing::debug!(
        input = summary.input_listings,
        records = records.len(),
        rejected = summary.rejected,
        merged = summary.duplicates_merged,
        "aggregation complete"
    );

    Aggregation {
        catalog: Catalog::from_unique(records),
        summary,
    }
}
