//! Core data models used throughout Deal Harness.
//!
//! These types represent the raw listings adapters produce, the validated
//! deal records the aggregator builds from them, and the catalogs the query
//! engine and exporter operate on.

use std::collections::HashSet;
use std::fmt;

use crate::error::{DealError, RejectReason};
use crate::taxonomy::{ProductCategory, RetailerId};

/// Unvalidated item produced by a source adapter before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub product_name_raw: String,
    pub category_raw: String,
    pub retailer: RetailerId,
    pub list_price: f64,
    pub sale_price: f64,
    pub source_url: Option<String>,
}

/// A validated, normalized deal.
///
/// Fields are private: the only way to obtain a record is through
/// [`DealRecord::new`], which enforces the price invariants and derives
/// `discount_percent` and `identity_key` from the other fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRecord {
    product_name: String,
    category: ProductCategory,
    retailer: RetailerId,
    list_price: f64,
    sale_price: f64,
    discount_percent: f64,
    source_url: Option<String>,
    identity_key: String,
}

impl DealRecord {
    pub fn new(
        product_name: &str,
        category: ProductCategory,
        retailer: RetailerId,
        list_price: f64,
        sale_price: f64,
        source_url: Option<String>,
    ) -> Result<Self, RejectReason> {
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(RejectReason::BlankName);
        }
        if !list_price.is_finite() || !sale_price.is_finite() {
            return Err(RejectReason::NonFinitePrice);
        }
        if list_price < 0.0 {
            return Err(RejectReason::NegativeListPrice);
        }
        if sale_price < 0.0 {
            return Err(RejectReason::NegativeSalePrice);
        }
        if sale_price > list_price {
            return Err(RejectReason::SaleAboveList);
        }

        Ok(Self {
            identity_key: identity_key(product_name, category),
            product_name: product_name.to_string(),
            category,
            retailer,
            list_price,
            sale_price,
            discount_percent: discount_percent(list_price, sale_price),
            source_url: source_url.filter(|u| !u.trim().is_empty()),
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn retailer(&self) -> RetailerId {
        self.retailer
    }

    pub fn list_price(&self) -> f64 {
        self.list_price
    }

    pub fn sale_price(&self) -> f64 {
        self.sale_price
    }

    /// Percentage saved, rounded to one decimal place.
    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Folded name + category. Equal keys at different retailers are
    /// competing offers for the same product.
    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }
}

impl fmt::Display for DealRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.product_name, self.category)?;
        writeln!(f, "  Retailer: {}", self.retailer)?;
        writeln!(f, "  Original Price: ${:.2}", self.list_price)?;
        writeln!(f, "  Sale Price: ${:.2}", self.sale_price)?;
        writeln!(f, "  Discount: {:.1}% OFF", self.discount_percent)?;
        write!(f, "  URL: {}", self.source_url.as_deref().unwrap_or("N/A"))
    }
}

/// `(list - sale) / list * 100`, rounded half away from zero to one decimal.
/// A zero list price yields `0.0`.
pub fn discount_percent(list_price: f64, sale_price: f64) -> f64 {
    if list_price <= 0.0 {
        return 0.0;
    }
    round_to_tenth((list_price - sale_price) / list_price * 100.0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Lowercase, trim, and collapse internal whitespace runs to one space.
pub fn fold_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// De-duplication key: `"<folded name>|<category slug>"`.
pub fn identity_key(product_name: &str, category: ProductCategory) -> String {
    format!("{}|{}", fold_name(product_name), category.slug())
}

/// An ordered, immutable collection of deal records.
///
/// No two records share both identity key and retailer. Query operations
/// borrow a catalog and return a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<DealRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, refusing duplicate offers.
    pub fn from_records(records: Vec<DealRecord>) -> Result<Self, DealError> {
        let mut seen: HashSet<(&str, RetailerId)> = HashSet::new();
        for r in &records {
            if !seen.insert((r.identity_key(), r.retailer())) {
                return Err(DealError::DuplicateOffer {
                    identity_key: r.identity_key().to_string(),
                    retailer: r.retailer(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Wrap records already known to be free of duplicate offers: aggregator
    /// output, or a subset/reordering of an existing catalog.
    pub(crate) fn from_unique(records: Vec<DealRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DealRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DealRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DealRecord;
    type IntoIter = std::slice::Iter<'a, DealRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
