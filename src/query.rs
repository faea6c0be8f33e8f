//! Query engine: stateless filters and sorts over a [`Catalog`].
//!
//! Every operation borrows its input and returns a new catalog, so calls
//! compose in any order (`filter → filter → sort`, `sort → filter`, …).
//! Out-of-range numeric arguments are never errors; they simply match
//! everything or nothing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{fold_name, Catalog, DealRecord};
use crate::taxonomy::{ProductCategory, RetailerId};

fn retain<F>(catalog: &Catalog, keep: F) -> Catalog
where
    F: Fn(&DealRecord) -> bool,
{
    Catalog::from_unique(catalog.iter().filter(|r| keep(*r)).cloned().collect())
}

fn sorted<F>(catalog: &Catalog, compare: F) -> Catalog
where
    F: Fn(&DealRecord, &DealRecord) -> Ordering,
{
    let mut records = catalog.records().to_vec();
    // `sort_by` is stable: equal keys keep catalog order.
    records.sort_by(|a, b| compare(a, b));
    Catalog::from_unique(records)
}

pub fn filter_by_category(catalog: &Catalog, category: ProductCategory) -> Catalog {
    retain(catalog, |r| r.category() == category)
}

/// Keep records whose category is one of `categories`. An empty slice keeps
/// everything.
pub fn filter_by_categories(catalog: &Catalog, categories: &[ProductCategory]) -> Catalog {
    if categories.is_empty() {
        return catalog.clone();
    }
    retain(catalog, |r| categories.contains(&r.category()))
}

pub fn filter_by_min_discount(catalog: &Catalog, min_percent: f64) -> Catalog {
    retain(catalog, |r| r.discount_percent() >= min_percent)
}

pub fn filter_by_max_price(catalog: &Catalog, max_price: f64) -> Catalog {
    retain(catalog, |r| r.sale_price() <= max_price)
}

pub fn filter_by_retailer(catalog: &Catalog, retailer: RetailerId) -> Catalog {
    retain(catalog, |r| r.retailer() == retailer)
}

/// Case-insensitive substring match on the product name. A blank term keeps
/// everything.
pub fn filter_by_search_term(catalog: &Catalog, term: &str) -> Catalog {
    let needle = fold_name(term);
    if needle.is_empty() {
        return catalog.clone();
    }
    retain(catalog, |r| fold_name(r.product_name()).contains(&needle))
}

/// Highest discount first; ties by lower sale price, then catalog order.
pub fn sort_by_discount_descending(catalog: &Catalog) -> Catalog {
    sorted(catalog, |a, b| {
        b.discount_percent()
            .total_cmp(&a.discount_percent())
            .then_with(|| a.sale_price().total_cmp(&b.sale_price()))
    })
}

/// Lowest sale price first; ties by higher discount, then catalog order.
pub fn sort_by_price_ascending(catalog: &Catalog) -> Catalog {
    sorted(catalog, |a, b| {
        a.sale_price()
            .total_cmp(&b.sale_price())
            .then_with(|| b.discount_percent().total_cmp(&a.discount_percent()))
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Declarative queries
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Discount,
    Price,
}

impl SortOrder {
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        match self {
            SortOrder::Discount => sort_by_discount_descending(catalog),
            SortOrder::Price => sort_by_price_ascending(catalog),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discount" => Ok(SortOrder::Discount),
            "price" => Ok(SortOrder::Price),
            other => Err(format!(
                "unknown sort order: '{}'. Use discount or price.",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Discount => f.write_str("discount"),
            SortOrder::Price => f.write_str("price"),
        }
    }
}

/// A bundle of filters plus a sort, as collected from the CLI.
///
/// Applied in a fixed order: categories, search term, minimum discount,
/// maximum price, retailer, then sort.
#[derive(Debug, Clone, Default)]
pub struct DealQuery {
    pub categories: Vec<ProductCategory>,
    pub search_term: Option<String>,
    pub min_discount: Option<f64>,
    pub max_price: Option<f64>,
    pub retailer: Option<RetailerId>,
    pub sort: SortOrder,
}

impl DealQuery {
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        let mut view = filter_by_categories(catalog, &self.categories);
        if let Some(term) = &self.search_term {
            view = filter_by_search_term(&view, term);
        }
        if let Some(min) = self.min_discount {
            view = filter_by_min_discount(&view, min);
        }
        if let Some(max) = self.max_price {
            view = filter_by_max_price(&view, max);
        }
        if let Some(retailer) = self.retailer {
            view = filter_by_retailer(&view, retailer);
        }
        self.sort.apply(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::RawListing;

    fn raw(name: &str, cat: &str, retailer: RetailerId, list: f64, sale: f64) -> RawListing {
        RawListing {
            product_name_raw: name.to_string(),
            category_raw: cat.to_string(),
            retailer,
            list_price: list,
            sale_price: sale,
            source_url: None,
        }
    }

    fn sample() -> Catalog {
        aggregate(vec![
            raw("RTX 4070", "GPU", RetailerId::Amazon, 599.99, 479.99),
            raw("Ryzen 7", "CPU", RetailerId::Newegg, 349.99, 299.99),
            raw("RTX 4070", "GPU", RetailerId::Newegg, 599.99, 499.99),
            raw("RX 7800 XT", "GPU", RetailerId::BestBuy, 499.99, 449.99),
            raw("PlayStation 5", "Console", RetailerId::Amazon, 499.99, 449.99),
        ])
        .catalog
    }

    fn names(c: &Catalog) -> Vec<String> {
        c.iter()
            .map(|r| format!("{}/{}", r.product_name(), r.retailer()))
            .collect()
    }

    #[test]
    fn test_filter_by_category_is_idempotent() {
        let c = sample();
        let once = filter_by_category(&c, ProductCategory::Gpu);
        let twice = filter_by_category(&once, ProductCategory::Gpu);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_filters_do_not_mutate_input() {
        let c = sample();
        let before = c.clone();
        let _ = filter_by_max_price(&c, 100.0);
        let _ = sort_by_price_ascending(&c);
        assert_eq!(c, before);
    }

    #[test]
    fn test_min_discount_edges() {
        let c = sample();
        assert_eq!(filter_by_min_discount(&c, -5.0), c);
        assert!(filter_by_min_discount(&c, 100.1).is_empty());
        // RTX 4070 @ Amazon is exactly 20.0
        assert_eq!(filter_by_min_discount(&c, 20.0).len(), 1);
    }

    #[test]
    fn test_negative_max_price_is_empty() {
        assert!(filter_by_max_price(&sample(), -1.0).is_empty());
        assert_eq!(filter_by_max_price(&sample(), 449.99).len(), 3);
    }

    #[test]
    fn test_filter_by_retailer() {
        let c = filter_by_retailer(&sample(), RetailerId::Amazon);
        assert_eq!(names(&c), vec!["RTX 4070/Amazon", "PlayStation 5/Amazon"]);
    }

    #[test]
    fn test_filter_composition_is_order_independent() {
        let c = sample();
        let a = filter_by_max_price(&filter_by_category(&c, ProductCategory::Gpu), 500.0);
        let b = filter_by_category(&filter_by_max_price(&c, 500.0), ProductCategory::Gpu);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_sort_by_discount_breaks_ties_by_price() {
        // RX 7800 XT and PS5 are both 10.0%; both cost 449.99, so catalog
        // order decides.
        let sorted = sort_by_discount_descending(&sample());
        assert_eq!(
            names(&sorted),
            vec![
                "RTX 4070/Amazon",
                "RTX 4070/Newegg",
                "Ryzen 7/Newegg",
                "RX 7800 XT/Best Buy",
                "PlayStation 5/Amazon",
            ]
        );
    }

    #[test]
    fn test_sort_by_discount_prefers_cheaper_on_equal_discount() {
        // Both 20.0% off; the cheaper one arrives second.
        let c = aggregate(vec![
            raw("A", "GPU", RetailerId::Amazon, 500.0, 400.0),
            raw("B", "GPU", RetailerId::Amazon, 250.0, 200.0),
        ])
        .catalog;
        let sorted = sort_by_discount_descending(&c);
        let order: Vec<_> = sorted.iter().map(|r| r.product_name()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_sort_by_price_keeps_insertion_order_on_full_tie() {
        let c = aggregate(vec![
            raw("First", "GPU", RetailerId::Amazon, 500.0, 400.0),
            raw("Second", "GPU", RetailerId::Newegg, 500.0, 400.0),
            raw("Third", "GPU", RetailerId::Walmart, 500.0, 400.0),
        ])
        .catalog;
        let sorted = sort_by_price_ascending(&c);
        let order: Vec<_> = sorted.iter().map(|r| r.product_name()).collect();
        assert_eq!(order, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sort_by_discount_descending(&sample());
        assert_eq!(sort_by_discount_descending(&once), once);
        let once = sort_by_price_ascending(&sample());
        assert_eq!(sort_by_price_ascending(&once), once);
    }

    #[test]
    fn test_sort_by_price_breaks_ties_by_discount() {
        let c = aggregate(vec![
            raw("A", "GPU", RetailerId::Amazon, 500.0, 400.0),
            raw("B", "GPU", RetailerId::Amazon, 800.0, 400.0),
            raw("C", "GPU", RetailerId::Amazon, 300.0, 250.0),
        ])
        .catalog;
        let sorted = sort_by_price_ascending(&c);
        let order: Vec<_> = sorted.iter().map(|r| r.product_name()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_search_term_is_case_insensitive() {
        let c = filter_by_search_term(&sample(), "  rtx ");
        assert_eq!(c.len(), 2);
        assert_eq!(filter_by_search_term(&sample(), ""), sample());
    }

    #[test]
    fn test_empty_catalog_stays_empty() {
        let empty = Catalog::new();
        assert!(filter_by_category(&empty, ProductCategory::Gpu).is_empty());
        assert!(sort_by_discount_descending(&empty).is_empty());
        assert!(DealQuery::default().apply(&empty).is_empty());
    }

    #[test]
    fn test_deal_query_combines_filters() {
        let q = DealQuery {
            categories: vec![ProductCategory::Gpu, ProductCategory::Console],
            max_price: Some(480.0),
            sort: SortOrder::Price,
            ..Default::default()
        };
        let c = q.apply(&sample());
        assert_eq!(
            names(&c),
            vec!["RX 7800 XT/Best Buy", "PlayStation 5/Amazon", "RTX 4070/Amazon"]
        );
    }

    #[test]
    fn test_sort_order_parses() {
        assert_eq!("Price".parse::<SortOrder>(), Ok(SortOrder::Price));
        assert_eq!("discount".parse::<SortOrder>(), Ok(SortOrder::Discount));
        assert!("name".parse::<SortOrder>().is_err());
    }
}
