//! # Deal Harness CLI (`deals`)
//!
//! ## Usage
//!
//! ```bash
//! deals --config ./config/deals.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `deals sources` | List configured adapters and their health |
//! | `deals categories` | List the product taxonomy |
//! | `deals search` | Aggregate, filter, sort, and print deals |
//! | `deals export` | Aggregate, filter, sort, and write JSON |
//! | `deals stats` | Print catalog statistics (`--json` for machine output) |
//!
//! ## Examples
//!
//! ```bash
//! # GPUs under $500, cheapest first
//! deals search --category GPU --max-price 500 --sort price
//!
//! # Everything at least 20% off from Newegg
//! deals search --retailer newegg --min-discount 20
//!
//! # Snapshot console and TV deals to a file
//! deals export --category Console --category TV --output ./out/deals.json
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use deal_harness::config::{self, Config};
use deal_harness::export;
use deal_harness::logging;
use deal_harness::query::{DealQuery, SortOrder};
use deal_harness::search;
use deal_harness::sources;
use deal_harness::stats;
use deal_harness::taxonomy::{ProductCategory, RetailerId};

/// Deal Harness CLI: aggregate electronics discounts from multiple
/// retailers into one catalog.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, only the built-in sample deals are
/// used.
#[derive(Parser)]
#[command(
    name = "deals",
    about = "Deal Harness: aggregate, filter, and export electronics discounts",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/deals.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured adapters and their status.
    Sources {
        /// Print a JSON array instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the product categories deals are classified into.
    Categories,

    /// Aggregate all adapters and print matching deals.
    ///
    /// An aggregation summary (rejected listings, unavailable adapters) is
    /// printed to stderr.
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Maximum number of deals to print.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Aggregate all adapters and export matching deals as JSON.
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print catalog statistics.
    Stats {
        /// Print statistics and the aggregation summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Filters and sort shared by `search` and `export`.
#[derive(Args, Clone, Debug)]
struct QueryArgs {
    /// Keep only this category (repeatable). Defaults to
    /// `[query].default_categories`, or all categories.
    #[arg(long = "category")]
    categories: Vec<ProductCategory>,

    /// Keep only deals from this retailer.
    #[arg(long)]
    retailer: Option<RetailerId>,

    /// Minimum discount percentage.
    #[arg(long, allow_negative_numbers = true)]
    min_discount: Option<f64>,

    /// Maximum sale price.
    #[arg(long, allow_negative_numbers = true)]
    max_price: Option<f64>,

    /// Case-insensitive text that must appear in the product name.
    #[arg(long)]
    query: Option<String>,

    /// `discount` (highest first) or `price` (lowest first). Defaults to
    /// `[query].default_sort`.
    #[arg(long)]
    sort: Option<SortOrder>,
}

impl QueryArgs {
    fn resolve(self, cfg: &Config) -> Result<DealQuery> {
        let categories = if self.categories.is_empty() {
            cfg.query.categories()?
        } else {
            self.categories
        };
        let sort = match self.sort {
            Some(sort) => sort,
            None => cfg.query.sort()?,
        };

        Ok(DealQuery {
            categories,
            search_term: self.query,
            min_discount: self.min_discount,
            max_price: self.max_price,
            retailer: self.retailer,
            sort,
        })
    }
}

fn load(path: &std::path::Path) -> Result<Config> {
    if path.exists() {
        config::load_config(path)
    } else {
        tracing::info!(path = %path.display(), "config file not found, using built-in sample deals");
        Ok(Config::minimal())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    if let Commands::Categories = cli.command {
        for cat in ProductCategory::ALL {
            println!("{}", cat.label());
        }
        return Ok(());
    }

    let cfg = load(&cli.config)?;

    match cli.command {
        Commands::Sources { json } => {
            sources::list_sources(&cfg, json)?;
        }
        Commands::Search { query, limit } => {
            let query = query.resolve(&cfg)?;
            search::run_search(&cfg, &query, limit).await?;
        }
        Commands::Export { query, output } => {
            let query = query.resolve(&cfg)?;
            export::run_export(&cfg, &query, output.as_deref()).await?;
        }
        Commands::Stats { json } => {
            stats::run_stats(&cfg, json).await?;
        }
        Commands::Categories => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
