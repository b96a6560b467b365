//! Requests and responses
//!
//! The JSON boundary of the engine. Loosely typed input records are validated
//! into [`GroceryItem`]s and [`PriceQuote`]s here; everything past this point
//! works on validated values only.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::{Deserialize, Serialize};

use crate::{
    basket::Basket,
    items::{GroceryItem, RawGroceryItem, validate_items},
    optimizer::{OptimizerError, SearchOptions, optimize},
    quotes::{PriceQuote, QuoteError, RawPriceQuote, normalize_quotes},
    solvers::BasketOutcome,
};

/// Currency used when a request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A basket optimisation request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketRequest {
    /// Grocery list to cover
    pub items: Vec<RawGroceryItem>,

    /// Price quotes from any number of retailers
    pub quotes: Vec<RawPriceQuote>,

    /// Maximum number of distinct stores to shop at
    pub max_stores: i64,

    /// ISO currency code for all prices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Looks up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`OptimizerError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, OptimizerError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => Ok(USD),
        "GBP" => Ok(GBP),
        "EUR" => Ok(EUR),
        _ => Err(OptimizerError::UnknownCurrency(code.to_string())),
    }
}

impl BasketRequest {
    /// Validate the request.
    ///
    /// Bad quotes are dropped and recorded on the prepared request; a bad
    /// store limit, item or currency rejects the request.
    ///
    /// # Errors
    ///
    /// Returns an [`OptimizerError`] for request-level defects.
    pub fn prepare(&self) -> Result<PreparedRequest, OptimizerError> {
        let max_stores = usize::try_from(self.max_stores)
            .ok()
            .filter(|max_stores| *max_stores > 0)
            .ok_or(OptimizerError::InvalidStoreCount(self.max_stores))?;

        let currency = parse_currency(self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))?;
        let items = validate_items(&self.items)?;
        let normalized = normalize_quotes(&self.quotes, &items, currency);

        Ok(PreparedRequest {
            items,
            quotes: normalized.quotes,
            rejected: normalized.rejected,
            max_stores,
            currency,
        })
    }

    /// Validate, optimise and render the response in one go.
    ///
    /// # Errors
    ///
    /// Returns an [`OptimizerError`] for request-level defects or solver failures.
    pub fn respond(&self, options: &SearchOptions) -> Result<BasketResponse, OptimizerError> {
        let prepared = self.prepare()?;
        let outcome = prepared.optimize(options)?;

        Ok(prepared.response(&outcome))
    }
}

/// A validated request, ready to optimise.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    items: Vec<GroceryItem>,
    quotes: Vec<PriceQuote>,
    rejected: Vec<QuoteError>,
    max_stores: usize,
    currency: &'static Currency,
}

impl PreparedRequest {
    /// Run the search.
    ///
    /// # Errors
    ///
    /// Returns an [`OptimizerError`] if the search fails.
    pub fn optimize(&self, options: &SearchOptions) -> Result<BasketOutcome<'_>, OptimizerError> {
        optimize(
            &self.items,
            &self.quotes,
            self.max_stores,
            self.currency,
            options,
        )
    }

    /// Render an outcome of this request for the wire.
    pub fn response(&self, outcome: &BasketOutcome<'_>) -> BasketResponse {
        let outcome = match outcome {
            BasketOutcome::Found(basket) => ResponseOutcome::from_basket(basket),
            BasketOutcome::Infeasible => ResponseOutcome::NoBasket,
            BasketOutcome::PartialTimeout { evaluated, total } => {
                ResponseOutcome::PartialTimeout {
                    evaluated: *evaluated,
                    total: *total,
                }
            }
        };

        BasketResponse {
            outcome,
            rejected: self.rejected.iter().map(RejectedQuote::from).collect(),
        }
    }

    /// Validated grocery items
    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    /// Accepted quotes
    pub fn quotes(&self) -> &[PriceQuote] {
        &self.quotes
    }

    /// Quotes dropped during validation
    pub fn rejected(&self) -> &[QuoteError] {
        &self.rejected
    }

    /// Store limit
    pub fn max_stores(&self) -> usize {
        self.max_stores
    }

    /// Request currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Response to a basket request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketResponse {
    /// What the search found
    #[serde(flatten)]
    pub outcome: ResponseOutcome,

    /// Input quotes that were dropped
    pub rejected: Vec<RejectedQuote>,
}

/// Search outcome on the wire, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ResponseOutcome {
    /// The cheapest basket
    Found {
        /// Distinct retailers used
        stores: Vec<String>,
        /// Sum of the line costs
        total_cost: Decimal,
        /// One entry per grocery item, in list order
        assignments: Vec<AssignmentResponse>,
    },

    /// No combination of stores covers the whole list.
    NoBasket,

    /// The search was cut short; the answer is unknown.
    PartialTimeout {
        /// Combinations evaluated
        evaluated: u64,
        /// Combinations in the full search
        total: Option<u64>,
    },
}

impl ResponseOutcome {
    fn from_basket(basket: &Basket<'_>) -> Self {
        ResponseOutcome::Found {
            stores: basket.stores().iter().map(ToString::to_string).collect(),
            total_cost: to_decimal(basket.total()),
            assignments: basket
                .iter()
                .map(|assignment| AssignmentResponse {
                    item_id: assignment.item().id().to_string(),
                    item_name: assignment.item().name().to_string(),
                    retailer: assignment.retailer().to_string(),
                    quantity: assignment.item().quantity(),
                    unit_price: to_decimal(*assignment.quote().unit_price()),
                    size: assignment
                        .quote()
                        .size()
                        .or_else(|| assignment.item().size())
                        .map(str::to_string),
                    line_cost: to_decimal(*assignment.line_cost()),
                })
                .collect(),
        }
    }
}

/// One item's chosen quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    /// Grocery item id
    pub item_id: String,
    /// Grocery item name
    pub item_name: String,
    /// Retailer the item is bought from
    pub retailer: String,
    /// Requested quantity
    pub quantity: u32,
    /// Price per unit
    pub unit_price: Decimal,
    /// Package size from the quote, or the item's size
    pub size: Option<String>,
    /// Unit price times quantity
    pub line_cost: Decimal,
}

/// A dropped input quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedQuote {
    /// Position in the input quote list
    pub index: usize,
    /// `invalid_quote` or `unmatched_item`
    pub kind: &'static str,
    /// Human readable reason
    pub reason: String,
}

impl From<&QuoteError> for RejectedQuote {
    fn from(err: &QuoteError) -> Self {
        let kind = match err {
            QuoteError::InvalidQuote { .. } => "invalid_quote",
            QuoteError::UnmatchedItem { .. } => "unmatched_item",
        };

        Self {
            index: err.index(),
            kind,
            reason: err.to_string(),
        }
    }
}

fn to_decimal(money: Money<'_, Currency>) -> Decimal {
    money.amount().normalize()
}
