//! Export a catalog as JSON, and read an export back.
//!
//! The document is a JSON array with one object per deal, in catalog order:
//!
//! ```json
//! [
//!   {
//!     "productName": "RTX 4070",
//!     "category": "GPU",
//!     "retailer": "Amazon",
//!     "listPrice": 599.99,
//!     "salePrice": 479.99,
//!     "discountPercent": 20.0,
//!     "sourceUrl": null
//!   }
//! ]
//! ```
//!
//! The identity key is internal and never exported. Choosing where the text
//! goes is the caller's job; see `deals export --output`.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::config::Config;
use crate::error::DealError;
use crate::ingest::{print_summary, run_aggregation};
use crate::models::{Catalog, DealRecord};
use crate::query::DealQuery;
use crate::taxonomy::{ProductCategory, RetailerId};
use crate::traits::AdapterRegistry;

fn to_value(catalog: &Catalog) -> Value {
    Value::Array(
        catalog
            .iter()
            .map(|r| {
                json!({
                    "productName": r.product_name(),
                    "category": r.category().label(),
                    "retailer": r.retailer().label(),
                    "listPrice": r.list_price(),
                    "salePrice": r.sale_price(),
                    "discountPercent": r.discount_percent(),
                    "sourceUrl": r.source_url(),
                })
            })
            .collect(),
    )
}

/// Pretty-printed JSON export.
pub fn export(catalog: &Catalog) -> String {
    format!("{:#}", to_value(catalog))
}

/// Single-line JSON export.
pub fn export_compact(catalog: &Catalog) -> String {
    to_value(catalog).to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ExportedDeal {
    product_name: String,
    category: ProductCategory,
    retailer: RetailerId,
    list_price: f64,
    sale_price: f64,
    // Recomputed on import; accepted so exported documents parse back.
    #[allow(dead_code)]
    discount_percent: f64,
    #[serde(default)]
    source_url: Option<String>,
}

/// Rebuild a catalog from an exported document.
///
/// Every record is re-validated and its discount recomputed; duplicate
/// offers are refused.
pub fn import(text: &str) -> Result<Catalog, DealError> {
    let rows: Vec<ExportedDeal> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let record = DealRecord::new(
            &row.product_name,
            row.category,
            row.retailer,
            row.list_price,
            row.sale_price,
            row.source_url,
        )
        .map_err(|reason| DealError::Invalid {
            index,
            product_name: row.product_name.clone(),
            reason,
        })?;
        records.push(record);
    }

    Catalog::from_records(records)
}

/// Aggregate, apply `query`, and write the export.
///
/// If `output` is `Some`, writes to that file path (creating parent
/// directories). Otherwise writes to stdout for piping.
pub async fn run_export(config: &Config, query: &DealQuery, output: Option<&Path>) -> Result<()> {
    let registry = AdapterRegistry::from_config(config);
    let (aggregation, _) = run_aggregation(&registry).await;
    print_summary(&aggregation.summary);

    let view = query.apply(&aggregation.catalog);
    let text = if config.export.pretty {
        export(&view)
    } else {
        export_compact(&view)
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{}\n", text))?;
            eprintln!("Exported {} deals to {}", view.len(), path.display());
        }
        None => {
            println!("{}", text);
        }
    }

    Ok(())
}
