//! Closed enumerations used to classify every deal: product categories and
//! known retailers.
//!
//! Both serialize by their display label (`"Power Supply"`, `"Best Buy"`), so
//! exported documents read naturally and parse back without loss.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════
// Product categories
// ═══════════════════════════════════════════════════════════════════════

/// Product category of a deal.
///
/// Raw category strings that match nothing resolve to
/// [`ProductCategory::Unclassified`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Motherboard,
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "Power Supply")]
    Psu,
    #[serde(rename = "PC Case")]
    Case,
    Monitor,
    Console,
    Television,
    Unclassified,
}

impl ProductCategory {
    /// Every category, in taxonomy order. `Unclassified` is last.
    pub const ALL: [ProductCategory; 12] = [
        ProductCategory::Cpu,
        ProductCategory::Gpu,
        ProductCategory::Ram,
        ProductCategory::Motherboard,
        ProductCategory::Ssd,
        ProductCategory::Hdd,
        ProductCategory::Psu,
        ProductCategory::Case,
        ProductCategory::Monitor,
        ProductCategory::Console,
        ProductCategory::Television,
        ProductCategory::Unclassified,
    ];

    /// Human-readable label, also used as the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Cpu => "CPU",
            ProductCategory::Gpu => "GPU",
            ProductCategory::Ram => "RAM",
            ProductCategory::Motherboard => "Motherboard",
            ProductCategory::Ssd => "SSD",
            ProductCategory::Hdd => "HDD",
            ProductCategory::Psu => "Power Supply",
            ProductCategory::Case => "PC Case",
            ProductCategory::Monitor => "Monitor",
            ProductCategory::Console => "Console",
            ProductCategory::Television => "Television",
            ProductCategory::Unclassified => "Unclassified",
        }
    }

    /// Short lowercase token used inside identity keys.
    pub fn slug(&self) -> &'static str {
        match self {
            ProductCategory::Cpu => "cpu",
            ProductCategory::Gpu => "gpu",
            ProductCategory::Ram => "ram",
            ProductCategory::Motherboard => "motherboard",
            ProductCategory::Ssd => "ssd",
            ProductCategory::Hdd => "hdd",
            ProductCategory::Psu => "psu",
            ProductCategory::Case => "case",
            ProductCategory::Monitor => "monitor",
            ProductCategory::Console => "console",
            ProductCategory::Television => "television",
            ProductCategory::Unclassified => "unclassified",
        }
    }

    /// Look up a raw category string. Returns `None` when nothing matches.
    ///
    /// Matching ignores case and surrounding whitespace and accepts the
    /// label, the slug, and a handful of common retailer spellings.
    pub fn lookup(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(cat) = Self::ALL
            .iter()
            .find(|c| c.label().to_lowercase() == needle || c.slug() == needle)
        {
            return Some(*cat);
        }

        let cat = match needle.as_str() {
            "processor" | "processors" | "cpus" => ProductCategory::Cpu,
            "graphics card" | "graphics cards" | "video card" | "gpus" => ProductCategory::Gpu,
            "memory" | "ddr4" | "ddr5" => ProductCategory::Ram,
            "mobo" | "motherboards" => ProductCategory::Motherboard,
            "solid state drive" | "nvme" | "ssds" => ProductCategory::Ssd,
            "hard drive" | "hard disk" | "hdds" => ProductCategory::Hdd,
            "power supply unit" | "power supplies" => ProductCategory::Psu,
            "pc cases" | "computer case" | "chassis" => ProductCategory::Case,
            "display" | "monitors" => ProductCategory::Monitor,
            "consoles" | "game console" | "gaming console" => ProductCategory::Console,
            "tv" | "tvs" | "televisions" => ProductCategory::Television,
            _ => return None,
        };
        Some(cat)
    }

    /// Resolve a raw category string, downgrading unknown values to
    /// [`ProductCategory::Unclassified`].
    pub fn classify(raw: &str) -> Self {
        Self::lookup(raw).unwrap_or(ProductCategory::Unclassified)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("unknown category: '{}'", s))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Retailers
// ═══════════════════════════════════════════════════════════════════════

/// A known retailer a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RetailerId {
    Amazon,
    Newegg,
    #[serde(rename = "Best Buy")]
    BestBuy,
    #[serde(rename = "Micro Center")]
    MicroCenter,
    #[serde(rename = "B&H Photo")]
    BhPhoto,
    Walmart,
    Target,
}

impl RetailerId {
    pub const ALL: [RetailerId; 7] = [
        RetailerId::Amazon,
        RetailerId::Newegg,
        RetailerId::BestBuy,
        RetailerId::MicroCenter,
        RetailerId::BhPhoto,
        RetailerId::Walmart,
        RetailerId::Target,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RetailerId::Amazon => "Amazon",
            RetailerId::Newegg => "Newegg",
            RetailerId::BestBuy => "Best Buy",
            RetailerId::MicroCenter => "Micro Center",
            RetailerId::BhPhoto => "B&H Photo",
            RetailerId::Walmart => "Walmart",
            RetailerId::Target => "Target",
        }
    }

    /// Look up a raw retailer string (`"Best Buy"`, `"bestbuy"`,
    /// `"best-buy"`, `"BEST_BUY"` all match).
    pub fn lookup(raw: &str) -> Option<Self> {
        let squashed = squash(raw);
        if squashed.is_empty() {
            return None;
        }
        if let Some(r) = Self::ALL.iter().find(|r| squash(r.label()) == squashed) {
            return Some(*r);
        }
        match squashed.as_str() {
            "bh" | "bandh" | "bhphotovideo" => Some(RetailerId::BhPhoto),
            "amazoncom" => Some(RetailerId::Amazon),
            _ => None,
        }
    }
}

/// Lowercase and drop everything except letters and digits.
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for RetailerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RetailerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("unknown retailer: '{}'", s))
    }
}
