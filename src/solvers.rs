//! Solvers for store-limited baskets

use std::time::{Duration, Instant};

use rayon::ThreadPoolBuildError;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    basket::{Basket, BasketError},
    combinations::CombinationError,
    items::GroceryItem,
    quotes::PriceQuote,
    stores::StoreUniverse,
};

pub mod assign;
pub mod exhaustive;
pub mod parallel;
pub mod single_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use assign::{Assignment, assign, assign_combination};
pub use exhaustive::ExhaustiveSolver;
pub use parallel::ParallelSolver;
pub use single_store::SingleStoreSolver;

/// Solver Errors
#[derive(Debug, Error)]
pub enum SolverError {
    /// Wrapped basket construction error
    #[error(transparent)]
    Basket(#[from] BasketError),

    /// Wrapped combination enumeration error
    #[error(transparent)]
    Combination(#[from] CombinationError),

    /// A running basket total exceeded the representable range.
    #[error("basket total overflows")]
    CostOverflow,

    /// The worker pool for a parallel search could not be started.
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Result of a basket search.
#[derive(Debug, Clone, PartialEq)]
pub enum BasketOutcome<'a> {
    /// The cheapest feasible basket
    Found(Basket<'a>),

    /// No combination of the searched size covers every item.
    Infeasible,

    /// The deadline expired before every combination was evaluated, so
    /// whether a (cheaper) basket exists is unknown.
    PartialTimeout {
        /// Combinations evaluated before the deadline
        evaluated: u64,

        /// Combinations in the full search, if countable
        total: Option<u64>,
    },
}

impl<'a> BasketOutcome<'a> {
    /// The basket, if one was found.
    pub fn basket(&self) -> Option<&Basket<'a>> {
        match self {
            BasketOutcome::Found(basket) => Some(basket),
            BasketOutcome::Infeasible | BasketOutcome::PartialTimeout { .. } => None,
        }
    }

    /// Consume the outcome, returning the basket if one was found.
    pub fn into_basket(self) -> Option<Basket<'a>> {
        match self {
            BasketOutcome::Found(basket) => Some(basket),
            BasketOutcome::Infeasible | BasketOutcome::PartialTimeout { .. } => None,
        }
    }

    /// Whether a basket was found.
    pub fn is_found(&self) -> bool {
        matches!(self, BasketOutcome::Found(_))
    }
}

/// Point in time after which a search stops at the next combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline.
    pub fn none() -> Self {
        Self(None)
    }

    /// Expires `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now().checked_add(budget))
    }

    /// Expires at `instant`.
    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|instant| Instant::now() >= instant)
    }
}

/// Validated search input shared by every solver.
///
/// Quotes are grouped per item once, keeping input order inside each group so
/// ties resolve to the earliest quote.
#[derive(Debug)]
pub struct SearchProblem<'a> {
    items: &'a [GroceryItem],
    universe: StoreUniverse<'a>,
    candidates: Vec<SmallVec<[&'a PriceQuote; 8]>>,
    currency: &'static Currency,
}

impl<'a> SearchProblem<'a> {
    /// Index `quotes` by the items they price.
    pub fn new(
        items: &'a [GroceryItem],
        quotes: &'a [PriceQuote],
        currency: &'static Currency,
    ) -> Self {
        let mut candidates = vec![SmallVec::new(); items.len()];

        for quote in quotes {
            if let Some(group) = candidates.get_mut(quote.item_idx()) {
                group.push(quote);
            }
        }

        Self {
            items,
            universe: StoreUniverse::from_quotes(quotes),
            candidates,
            currency,
        }
    }

    /// Grocery items to cover
    pub fn items(&self) -> &'a [GroceryItem] {
        self.items
    }

    /// Distinct retailers across all quotes
    pub fn universe(&self) -> &StoreUniverse<'a> {
        &self.universe
    }

    /// Quotes for one item, in input order
    pub fn candidates(&self, item_idx: usize) -> &[&'a PriceQuote] {
        match self.candidates.get(item_idx) {
            Some(group) => group.as_slice(),
            None => &[],
        }
    }

    /// Index of the first item nobody quotes, if any.
    pub fn unquoted_item(&self) -> Option<usize> {
        self.candidates.iter().position(SmallVec::is_empty)
    }

    /// Currency for all totals
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Trait for searching for the cheapest basket
pub trait Solver {
    /// Search for the cheapest basket within this solver's store limit.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve<'a>(
        &self,
        problem: &SearchProblem<'a>,
        deadline: Deadline,
    ) -> Result<BasketOutcome<'a>, SolverError>;
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn candidates_are_grouped_per_item_in_input_order() -> TestResult {
        let milk = GroceryItem::new("1", "milk", 1)?;
        let bread = GroceryItem::new("2", "bread", 1)?;
        let quotes = vec![
            PriceQuote::new(0, "A", 1, &bread, Money::from_minor(100, USD))?,
            PriceQuote::new(1, "B", 0, &milk, Money::from_minor(100, USD))?,
            PriceQuote::new(2, "C", 1, &bread, Money::from_minor(100, USD))?,
        ];
        let items = vec![milk, bread];

        let problem = SearchProblem::new(&items, &quotes, USD);

        let sources: Vec<usize> = problem
            .candidates(1)
            .iter()
            .map(|quote| quote.source_idx())
            .collect();

        assert_eq!(sources, vec![0, 2]);
        assert_eq!(problem.universe().stores(), &["A", "B", "C"]);
        assert_eq!(problem.unquoted_item(), None);
        assert!(problem.candidates(9).is_empty());

        Ok(())
    }

    #[test]
    fn unquoted_item_is_reported() -> TestResult {
        let items = vec![GroceryItem::new("1", "milk", 1)?];
        let problem = SearchProblem::new(&items, &[], USD);

        assert_eq!(problem.unquoted_item(), Some(0));

        Ok(())
    }

    #[test]
    fn deadline_in_the_past_is_expired() {
        assert!(Deadline::at(Instant::now()).expired());
        assert!(!Deadline::none().expired());
        assert!(!Deadline::after(Duration::from_secs(3600)).expired());
    }
}
