//! Built-in demonstration listings.
//!
//! Lets `deals search` produce output before any real feed is configured.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::RawListing;
use crate::taxonomy::RetailerId;
use crate::traits::SourceAdapter;

pub struct SampleAdapter;

#[async_trait]
impl SourceAdapter for SampleAdapter {
    fn name(&self) -> &str {
        "builtin"
    }

    fn description(&self) -> &str {
        "Built-in demonstration deals"
    }

    fn adapter_type(&self) -> &str {
        "sample"
    }

    async fn scan(&self) -> Result<Vec<RawListing>> {
        Ok(sample_listings())
    }
}

pub fn sample_listings() -> Vec<RawListing> {
    let listing = |name: &str, category: &str, retailer, list, sale, url: &str| RawListing {
        product_name_raw: name.to_string(),
        category_raw: category.to_string(),
        retailer,
        list_price: list,
        sale_price: sale,
        source_url: Some(url.to_string()),
    };

    vec![
        listing(
            "AMD Ryzen 9 5900X",
            "CPU",
            RetailerId::Newegg,
            549.99,
            399.99,
            "https://www.newegg.com/example",
        ),
        listing(
            "NVIDIA RTX 4070",
            "GPU",
            RetailerId::BestBuy,
            599.99,
            499.99,
            "https://www.bestbuy.com/example",
        ),
        listing(
            "PlayStation 5",
            "Console",
            RetailerId::Amazon,
            499.99,
            449.99,
            "https://www.amazon.com/example",
        ),
        listing(
            "Samsung 55\" 4K TV",
            "Television",
            RetailerId::Target,
            799.99,
            599.99,
            "https://www.target.com/example",
        ),
    ]
}
