//! JSON listing feed format shared by the file and HTTP adapters.
//!
//! A feed is a JSON array of records:
//!
//! ```json
//! [
//!   {
//!     "product_name": "AMD Ryzen 9 5900X",
//!     "category": "CPU",
//!     "retailer": "Newegg",
//!     "list_price": 549.99,
//!     "sale_price": 399.99,
//!     "source_url": "https://www.newegg.com/example"
//!   }
//! ]
//! ```
//!
//! `original_price` and `url` are accepted as aliases, and so are the
//! camelCase keys written by [`export`](crate::export::export), so an export
//! can be fed straight back in. Unknown keys are ignored.
//!
//! Records that cannot be read (missing price, unknown retailer) are skipped
//! with a warning and counted in [`ParsedFeed::skipped`]. Price invariants
//! are *not* checked here; that is the aggregator's job.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::models::RawListing;
use crate::taxonomy::RetailerId;

#[derive(Debug, Deserialize)]
struct FeedRecord {
    #[serde(alias = "productName", alias = "name")]
    product_name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    retailer: Option<String>,
    #[serde(alias = "listPrice", alias = "original_price")]
    list_price: f64,
    #[serde(alias = "salePrice")]
    sale_price: f64,
    #[serde(default, alias = "sourceUrl", alias = "url")]
    source_url: Option<String>,
}

/// Listings read from one or more feed documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    pub listings: Vec<RawListing>,
    /// Rows present in the document that could not be turned into a listing.
    pub skipped: usize,
}

impl ParsedFeed {
    /// Append another feed's rows after this one's.
    pub fn append(&mut self, mut other: ParsedFeed) {
        self.listings.append(&mut other.listings);
        self.skipped += other.skipped;
    }

    /// Total rows seen, readable or not.
    pub fn rows(&self) -> usize {
        self.listings.len() + self.skipped
    }
}

impl From<Vec<RawListing>> for ParsedFeed {
    fn from(listings: Vec<RawListing>) -> Self {
        Self {
            listings,
            skipped: 0,
        }
    }
}

/// Parse a feed document.
///
/// `default_retailer` fills records without a `retailer` key. `origin`
/// names the document in log messages and errors.
pub fn parse_feed(
    text: &str,
    default_retailer: Option<RetailerId>,
    origin: &str,
) -> Result<ParsedFeed> {
    let doc: Value =
        serde_json::from_str(text).with_context(|| format!("{}: invalid JSON", origin))?;
    let rows = match doc {
        Value::Array(rows) => rows,
        _ => bail!("{}: expected a JSON array of listings", origin),
    };

    let mut feed = ParsedFeed {
        listings: Vec::with_capacity(rows.len()),
        skipped: 0,
    };
    for (i, row) in rows.into_iter().enumerate() {
        let record: FeedRecord = match serde_json::from_value(row) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(origin, index = i, error = %e, "skipping unreadable listing");
                feed.skipped += 1;
                continue;
            }
        };

        let retailer = match record.retailer.as_deref() {
            Some(raw) => RetailerId::lookup(raw),
            None => default_retailer,
        };
        let Some(retailer) = retailer else {
            tracing::warn!(
                origin,
                index = i,
                retailer = ?record.retailer,
                "skipping listing with unknown or missing retailer"
            );
            feed.skipped += 1;
            continue;
        };

        feed.listings.push(RawListing {
            product_name_raw: record.product_name,
            category_raw: record.category,
            retailer,
            list_price: record.list_price,
            sale_price: record.sale_price,
            source_url: record.source_url,
        });
    }

    Ok(feed)
}
