//! Extension trait for listing sources.
//!
//! Every retailer feed sits behind [`SourceAdapter`]: it either produces a
//! finite list of [`RawListing`]s or fails. The aggregator never sees how
//! listings were obtained, so new retailers plug in without touching the
//! aggregation, query, or export code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             AdapterRegistry              │
//! │  ┌─────────┐ ┌─────────┐ ┌────────────┐  │
//! │  │ Sample  │ │File/HTTP│ │  Custom    │  │
//! │  │ deals   │ │  JSON   │ │  (Rust)    │  │
//! │  └─────────┘ └─────────┘ └────────────┘  │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!       collect_listings() → aggregate()
//! ```
//!
//! # Usage
//!
//! ```rust
//! use deal_harness::traits::AdapterRegistry;
//!
//! let mut adapters = AdapterRegistry::new();
//! // adapters.register(Box::new(MyRetailerFeed::new()));
//! assert!(adapters.is_empty());
//! ```

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::feed::ParsedFeed;
use crate::models::RawListing;

/// A source of raw listings for one retailer feed.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use deal_harness::models::RawListing;
/// use deal_harness::taxonomy::RetailerId;
/// use deal_harness::traits::SourceAdapter;
///
/// pub struct WeeklyFlyer;
///
/// #[async_trait]
/// impl SourceAdapter for WeeklyFlyer {
///     fn name(&self) -> &str { "weekly" }
///     fn description(&self) -> &str { "Hand-entered weekly flyer deals" }
///
///     async fn scan(&self) -> Result<Vec<RawListing>> {
///         Ok(vec![RawListing {
///             product_name_raw: "Xbox Series X".to_string(),
///             category_raw: "Console".to_string(),
///             retailer: RetailerId::Walmart,
///             list_price: 499.99,
///             sale_price: 429.99,
///             source_url: None,
///         }])
///     }
/// }
/// ```
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Instance name (e.g. `"newegg"`).
    fn name(&self) -> &str;

    /// One-line description, shown by `deals sources`.
    fn description(&self) -> &str;

    /// Adapter type (`"file"`, `"http"`, `"sample"`, `"custom"`).
    fn adapter_type(&self) -> &str {
        "custom"
    }

    /// `"{type}:{name}"`, used in logs and aggregation summaries.
    fn label(&self) -> String {
        format!("{}:{}", self.adapter_type(), self.name())
    }

    /// Fetch every listing this source currently offers.
    ///
    /// An `Err` is never fatal: the run continues and this adapter is
    /// reported as unavailable.
    async fn scan(&self) -> Result<Vec<RawListing>>;

    /// Like [`scan`](SourceAdapter::scan), but also reports feed rows that
    /// were reached and could not be read.
    ///
    /// Feed-backed adapters override this; the default reports no skips.
    async fn scan_feed(&self) -> Result<ParsedFeed> {
        Ok(ParsedFeed::from(self.scan().await?))
    }
}

/// Ordered set of adapters for one aggregation run.
///
/// Adapters are scanned in registration order, which fixes the order of
/// the combined listing sequence and therefore of the catalog.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn SourceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Create a registry with every adapter configured in `config`.
    ///
    /// Order: the sample adapter (if enabled), then file adapters, then HTTP
    /// adapters, each group sorted by instance name.
    pub fn from_config(config: &Config) -> Self {
        use crate::connector_file::FileAdapter;
        use crate::connector_http::HttpAdapter;
        use crate::connector_sample::SampleAdapter;

        let mut registry = Self::new();

        if config.connectors.sample.enabled {
            registry.register(Box::new(SampleAdapter));
        }
        for (name, cfg) in &config.connectors.file {
            registry.register(Box::new(FileAdapter::new(name.clone(), cfg.clone())));
        }
        for (name, cfg) in &config.connectors.http {
            registry.register(Box::new(HttpAdapter::new(name.clone(), cfg.clone())));
        }

        registry
    }

    pub fn register(&mut self, adapter: Box<dyn SourceAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn adapters(&self) -> &[Box<dyn SourceAdapter>] {
        &self.adapters
    }

    /// Find an adapter by its `"{type}:{name}"` label.
    pub fn find(&self, label: &str) -> Option<&dyn SourceAdapter> {
        self.adapters
            .iter()
            .find(|a| a.label() == label)
            .map(|a| a.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
