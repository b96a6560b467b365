//! Basket

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{items::GroceryItem, quotes::PriceQuote};

/// Errors related to basket construction or totals.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// An assignment's currency differs from the basket currency (index, line currency, basket currency).
    #[error("Assignment {0} has currency {1}, but basket has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One grocery item paired with the quote chosen for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemAssignment<'a> {
    item: &'a GroceryItem,
    quote: &'a PriceQuote,
}

impl<'a> ItemAssignment<'a> {
    /// Pair an item with a quote.
    pub fn new(item: &'a GroceryItem, quote: &'a PriceQuote) -> Self {
        Self { item, quote }
    }

    /// The grocery item
    pub fn item(&self) -> &'a GroceryItem {
        self.item
    }

    /// The chosen quote
    pub fn quote(&self) -> &'a PriceQuote {
        self.quote
    }

    /// Retailer of the chosen quote
    pub fn retailer(&self) -> &'a str {
        self.quote.retailer()
    }

    /// Cost of this line
    pub fn line_cost(&self) -> &'a Money<'static, Currency> {
        self.quote.line_cost()
    }
}

/// A set of item assignments and the total they add up to.
///
/// The total is derived from the assignments when the basket is built and the
/// basket is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Basket<'a> {
    assignments: Vec<ItemAssignment<'a>>,
    stores: SmallVec<[&'a str; 4]>,
    total: Money<'static, Currency>,
    currency: &'static Currency,
}

impl<'a> Basket<'a> {
    /// An empty basket.
    pub fn empty(currency: &'static Currency) -> Self {
        Self {
            assignments: Vec::new(),
            stores: SmallVec::new(),
            total: Money::from_minor(0, currency),
            currency,
        }
    }

    /// Build a basket from assignments, ordered as the grocery list.
    ///
    /// # Errors
    ///
    /// Returns a [`BasketError`] on a currency mismatch or money overflow.
    pub fn new(
        assignments: impl Into<Vec<ItemAssignment<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, BasketError> {
        let assignments = assignments.into();
        let mut total = Money::from_minor(0, currency);
        let mut stores: SmallVec<[&'a str; 4]> = SmallVec::new();

        for (idx, assignment) in assignments.iter().enumerate() {
            let line_currency = assignment.line_cost().currency();

            if line_currency != currency {
                return Err(BasketError::CurrencyMismatch(
                    idx,
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            total = total.add(*assignment.line_cost())?;

            if !stores.contains(&assignment.retailer()) {
                stores.push(assignment.retailer());
            }
        }

        Ok(Self {
            assignments,
            stores,
            total,
            currency,
        })
    }

    /// Sum of the assignments' line costs.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Distinct retailers actually used, in order of first use.
    pub fn stores(&self) -> &[&'a str] {
        &self.stores
    }

    /// Assignments in grocery list order.
    pub fn assignments(&self) -> &[ItemAssignment<'a>] {
        &self.assignments
    }

    /// Iterate over the assignments.
    pub fn iter(&self) -> impl Iterator<Item = &ItemAssignment<'a>> {
        self.assignments.iter()
    }

    /// Whether every item appears exactly once, in list order.
    pub fn covers(&self, items: &[GroceryItem]) -> bool {
        self.assignments.len() == items.len()
            && self
                .assignments
                .iter()
                .zip(items)
                .all(|(assignment, item)| assignment.item().id() == item.id())
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the basket has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Currency of the basket.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
