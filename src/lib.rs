//! # Deal Harness
//!
//! Aggregates discount listings for consumer electronics (components,
//! consoles, televisions) from multiple retailer feeds into one normalized
//! catalog, then filters, sorts, and exports it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │  Adapters   │──▶│ Aggregator  │──▶│ Catalog  │
//! │ File/HTTP/… │   │ validate+   │   │ (ordered,│
//! └─────────────┘   │ dedupe      │   │ immutable)│
//!                   └─────────────┘   └────┬─────┘
//!                                          │
//!                      ┌───────────────────┤
//!                      ▼                   ▼
//!                 ┌──────────┐       ┌──────────┐
//!                 │  Query   │──────▶│  Export  │
//!                 │ filters/ │       │  (JSON)  │
//!                 │ sorts    │       └──────────┘
//!                 └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! deals sources                              # check configured feeds
//! deals search --category GPU --max-price 500
//! deals search --min-discount 15 --sort discount
//! deals export --output ./out/deals.json
//! deals stats
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use deal_harness::aggregate::aggregate;
//! use deal_harness::export::export;
//! use deal_harness::models::RawListing;
//! use deal_harness::query::{filter_by_min_discount, sort_by_discount_descending};
//! use deal_harness::taxonomy::RetailerId;
//!
//! let raw = vec![RawListing {
//!     product_name_raw: "RTX 4070".to_string(),
//!     category_raw: "GPU".to_string(),
//!     retailer: RetailerId::Amazon,
//!     list_price: 599.99,
//!     sale_price: 479.99,
//!     source_url: None,
//! }];
//!
//! let catalog = aggregate(raw).catalog;
//! let view = sort_by_discount_descending(&filter_by_min_discount(&catalog, 15.0));
//! assert_eq!(view.records()[0].discount_percent(), 20.0);
//! let json = export(&view);
//! assert!(json.contains("\"discountPercent\": 20.0"));
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`taxonomy`] | Product categories and retailers |
//! | [`models`] | Raw listings, deal records, catalogs |
//! | [`aggregate`] | Raw listings → catalog |
//! | [`query`] | Filters and sorts |
//! | [`export`] | JSON export and import |
//! | [`traits`] | Source adapter trait and registry |
//! | [`ingest`] | Run every adapter and aggregate |
//! | [`feed`] | JSON feed format read by adapters |
//! | [`config`] | TOML configuration parsing |
//! | [`stats`] | Catalog statistics |

pub mod aggregate;
pub mod config;
pub mod connector_file;
pub mod connector_http;
pub mod connector_sample;
pub mod error;
pub mod export;
pub mod feed;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod query;
pub mod search;
pub mod sources;
pub mod stats;
pub mod taxonomy;
pub mod traits;
