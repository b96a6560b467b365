//! Quotes Fixtures
//!
//! Quotes are grouped by retailer in YAML and flattened into one
//! [`RawPriceQuote`] per entry, keeping file order.

use serde::Deserialize;

use crate::{quotes::RawPriceQuote, raw::Scalar};

/// Wrapper for quotes in YAML
#[derive(Debug, Deserialize)]
pub struct QuotesFixture {
    /// Retailers and their price lists
    pub quotes: Vec<RetailerFixture>,
}

/// One retailer's price list
#[derive(Debug, Deserialize)]
pub struct RetailerFixture {
    /// Retailer identifier
    pub retailer: String,

    /// Priced items
    pub items: Vec<QuoteFixture>,
}

/// A single price entry
#[derive(Debug, Deserialize)]
pub struct QuoteFixture {
    /// Item id or name
    pub item: Scalar,

    /// Unit price; omitted to exercise rejection
    #[serde(default)]
    pub price: Option<Scalar>,

    /// Package size
    #[serde(default)]
    pub size: Option<String>,
}

impl QuotesFixture {
    /// Flatten into raw quote records.
    pub fn into_quotes(self) -> impl Iterator<Item = RawPriceQuote> {
        self.quotes.into_iter().flat_map(|retailer| {
            let name = retailer.retailer;

            retailer.items.into_iter().map(move |entry| RawPriceQuote {
                retailer: Some(name.clone()),
                item_ref: Some(entry.item),
                unit_price: entry.price,
                size: entry.size,
            })
        })
    }
}
