//! Domain error model.
//!
//! Listing-level failures are recovered by the aggregator (counted and
//! skipped); only [`import`](crate::export::import) surfaces a [`DealError`]
//! to the caller. Application boundaries (config, adapters, CLI) use
//! `anyhow::Result` instead.

use thiserror::Error;

use crate::taxonomy::RetailerId;

/// Why a single raw listing was refused by the price/name invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    #[error("product name is blank")]
    BlankName,

    #[error("price is not a finite number")]
    NonFinitePrice,

    #[error("list price is negative")]
    NegativeListPrice,

    #[error("sale price is negative")]
    NegativeSalePrice,

    #[error("sale price exceeds list price")]
    SaleAboveList,
}

/// Failure to rebuild a catalog from exported text.
#[derive(Debug, Error)]
pub enum DealError {
    /// A record violated a deal invariant.
    #[error("record {index} ({product_name:?}) is invalid: {reason}")]
    Invalid {
        index: usize,
        product_name: String,
        reason: RejectReason,
    },

    /// Two records share the same identity key and retailer.
    #[error("duplicate offer for {identity_key:?} at {retailer}")]
    DuplicateOffer {
        identity_key: String,
        retailer: RetailerId,
    },

    #[error("malformed export document: {0}")]
    Parse(#[from] serde_json::Error),
}
