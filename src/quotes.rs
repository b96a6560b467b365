//! Price Quotes
//!
//! Raw price records are validated one at a time. A defective record is
//! excluded and reported, the rest of the request carries on.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{items::GroceryItem, raw::Scalar};

/// Per-record quote defects. These never fail a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// Missing, malformed, negative or non-finite price, or a blank retailer.
    #[error("quote {index} is invalid: {reason}")]
    InvalidQuote {
        /// Position in the input quote list
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The quote references no item on the grocery list.
    #[error("quote {index} references unknown item {item_ref:?}")]
    UnmatchedItem {
        /// Position in the input quote list
        index: usize,
        /// The reference as supplied
        item_ref: String,
    },
}

impl QuoteError {
    /// Position of the rejected record in the input quote list.
    pub fn index(&self) -> usize {
        match self {
            QuoteError::InvalidQuote { index, .. } | QuoteError::UnmatchedItem { index, .. } => {
                *index
            }
        }
    }

    fn invalid(index: usize, reason: impl Into<String>) -> Self {
        QuoteError::InvalidQuote {
            index,
            reason: reason.into(),
        }
    }
}

/// A price record as supplied by the quote source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceQuote {
    /// Retailer identifier
    #[serde(alias = "retailer_name")]
    pub retailer: Option<String>,

    /// Item id or item name
    #[serde(alias = "grocery_id", alias = "item_ref")]
    pub item_ref: Option<Scalar>,

    /// Price per unit
    #[serde(alias = "price", alias = "unit_price")]
    pub unit_price: Option<Scalar>,

    /// Package size, e.g. "500g"
    #[serde(
        default,
        alias = "price_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<String>,
}

/// A validated price quote bound to one grocery item.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    retailer: String,
    item_idx: usize,
    unit_price: Money<'static, Currency>,
    line_cost: Money<'static, Currency>,
    size: Option<String>,
    source_idx: usize,
}

impl PriceQuote {
    /// Creates a quote for `item` (found at `item_idx` in the list).
    ///
    /// The unit price is kept exactly as given; sub-cent prices are not rounded.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidQuote`] if the price is negative, the retailer
    /// is blank, or the line cost overflows.
    pub fn new(
        source_idx: usize,
        retailer: impl Into<String>,
        item_idx: usize,
        item: &GroceryItem,
        unit_price: Money<'static, Currency>,
    ) -> Result<Self, QuoteError> {
        let retailer = retailer.into().trim().to_string();

        if retailer.is_empty() {
            return Err(QuoteError::invalid(source_idx, "retailer is blank"));
        }

        let amount = *unit_price.amount();

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(QuoteError::invalid(
                source_idx,
                format!("unit price {amount} is negative"),
            ));
        }

        let line_cost = amount
            .checked_mul(Decimal::from(item.quantity()))
            .ok_or_else(|| QuoteError::invalid(source_idx, "line cost overflows"))?;

        Ok(Self {
            retailer,
            item_idx,
            unit_price,
            line_cost: Money::from_decimal(line_cost, unit_price.currency()),
            size: None,
            source_idx,
        })
    }

    /// Sets the package size.
    #[must_use]
    pub fn with_size(mut self, size: Option<String>) -> Self {
        self.size = size;
        self
    }

    /// Retailer identifier
    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    /// Index of the quoted item in the grocery list
    pub fn item_idx(&self) -> usize {
        self.item_idx
    }

    /// Price per unit
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Unit price multiplied by the item quantity
    pub fn line_cost(&self) -> &Money<'static, Currency> {
        &self.line_cost
    }

    /// Package size
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Position of this quote in the input list
    pub fn source_idx(&self) -> usize {
        self.source_idx
    }
}

/// The outcome of normalizing a quote list.
#[derive(Debug, Clone, Default)]
pub struct NormalizedQuotes {
    /// Accepted quotes, in input order
    pub quotes: Vec<PriceQuote>,

    /// Rejected records, in input order
    pub rejected: Vec<QuoteError>,
}

/// Resolves quote item references against the grocery list.
///
/// Ids are matched exactly first, then names case-insensitively. When several
/// items share a name the earliest one wins.
#[derive(Debug)]
pub struct ItemResolver {
    by_id: FxHashMap<String, usize>,
    by_name: FxHashMap<String, usize>,
}

impl ItemResolver {
    /// Index the given items.
    pub fn new(items: &[GroceryItem]) -> Self {
        let mut by_id = FxHashMap::default();
        let mut by_name = FxHashMap::default();

        for (idx, item) in items.iter().enumerate() {
            by_id.entry(item.id().to_string()).or_insert(idx);
            by_name.entry(item.name().to_lowercase()).or_insert(idx);
        }

        Self { by_id, by_name }
    }

    /// Look up the item index for a reference.
    pub fn resolve(&self, item_ref: &str) -> Option<usize> {
        let item_ref = item_ref.trim();

        self.by_id
            .get(item_ref)
            .or_else(|| self.by_name.get(&item_ref.to_lowercase()))
            .copied()
    }
}

/// Validates and canonicalizes raw quotes against the grocery list.
///
/// Rejections are collected rather than returned as errors.
pub fn normalize_quotes(
    raw: &[RawPriceQuote],
    items: &[GroceryItem],
    currency: &'static Currency,
) -> NormalizedQuotes {
    let resolver = ItemResolver::new(items);
    let mut normalized = NormalizedQuotes::default();

    for (index, record) in raw.iter().enumerate() {
        match normalize_quote(index, record, items, &resolver, currency) {
            Ok(quote) => normalized.quotes.push(quote),
            Err(err) => {
                warn!(index, error = %err, "dropping price quote");
                normalized.rejected.push(err);
            }
        }
    }

    normalized
}

fn normalize_quote(
    index: usize,
    record: &RawPriceQuote,
    items: &[GroceryItem],
    resolver: &ItemResolver,
    currency: &'static Currency,
) -> Result<PriceQuote, QuoteError> {
    let unit_price = record
        .unit_price
        .as_ref()
        .ok_or_else(|| QuoteError::invalid(index, "unit price is missing"))?;

    let amount = unit_price.to_decimal().ok_or_else(|| {
        QuoteError::invalid(index, format!("unit price {unit_price} is not a finite number"))
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(QuoteError::invalid(
            index,
            format!("unit price {amount} is negative"),
        ));
    }

    let item_ref = record
        .item_ref
        .as_ref()
        .map(Scalar::to_ident)
        .unwrap_or_default();

    let (item_idx, item) = resolver
        .resolve(&item_ref)
        .and_then(|idx| items.get(idx).map(|item| (idx, item)))
        .ok_or(QuoteError::UnmatchedItem { index, item_ref })?;

    let retailer = record.retailer.as_deref().unwrap_or_default();

    let size = record
        .size
        .as_deref()
        .map(str::trim)
        .filter(|size| !size.is_empty())
        .map(str::to_string);

    let unit_price = Money::from_decimal(amount, currency);

    Ok(PriceQuote::new(index, retailer, item_idx, item, unit_price)?.with_size(size))
}
