//! Basket Optimizer
//!
//! The engine is a pure function of its inputs: grocery items, price quotes
//! and a store limit in, a [`BasketOutcome`] out. It holds no state between
//! calls and performs no I/O.

use std::time::Duration;

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    basket::Basket,
    items::{GroceryItem, ItemError},
    quotes::PriceQuote,
    solvers::{
        BasketOutcome, Deadline, ExhaustiveSolver, ParallelSolver, SearchProblem,
        SingleStoreSolver, Solver, SolverError,
    },
};

/// Request-level errors. These reject the whole request before any search.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// The store limit is not a positive integer.
    #[error("max stores must be at least 1, got {0}")]
    InvalidStoreCount(i64),

    /// The currency code is not supported.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Wrapped grocery list validation error
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Wrapped solver error
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// How combinations are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Canonical order on the calling thread
    #[default]
    Sequential,

    /// Spread over a rayon pool; `None` uses rayon's default thread count.
    Parallel {
        /// Worker thread count
        threads: Option<usize>,
    },
}

/// Search tuning. None of these change which basket is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// How combinations are evaluated
    pub strategy: SearchStrategy,

    /// Skip combinations whose running cost already exceeds the best found
    pub pruning: bool,

    /// Time budget for the search, measured from when it starts
    pub deadline: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Sequential,
            pruning: true,
            deadline: None,
        }
    }
}

impl SearchOptions {
    /// Set the search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable pruning.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Abort the search once `budget` has elapsed.
    #[must_use]
    pub fn with_deadline(mut self, budget: Duration) -> Self {
        self.deadline = Some(budget);
        self
    }
}

/// Find the cheapest way to buy every item from at most `max_stores` retailers.
///
/// If `max_stores` exceeds the number of retailers quoting, every retailer is
/// searched at once. An empty grocery list yields an empty basket.
///
/// # Errors
///
/// Returns [`OptimizerError::InvalidStoreCount`] if `max_stores` is zero, or an
/// [`OptimizerError::Solver`] if the search itself fails.
pub fn optimize<'a>(
    items: &'a [GroceryItem],
    quotes: &'a [PriceQuote],
    max_stores: usize,
    currency: &'static Currency,
    options: &SearchOptions,
) -> Result<BasketOutcome<'a>, OptimizerError> {
    if max_stores == 0 {
        return Err(OptimizerError::InvalidStoreCount(0));
    }

    if items.is_empty() {
        return Ok(BasketOutcome::Found(Basket::empty(currency)));
    }

    let problem = SearchProblem::new(items, quotes, currency);

    if let Some(item_idx) = problem.unquoted_item() {
        debug!(
            item = items.get(item_idx).map(GroceryItem::name),
            "item has no quotes at any store"
        );

        return Ok(BasketOutcome::Infeasible);
    }

    let store_count = max_stores.min(problem.universe().len());
    let deadline = options.deadline.map_or_else(Deadline::none, Deadline::after);

    debug!(
        items = items.len(),
        quotes = quotes.len(),
        stores = problem.universe().len(),
        store_count,
        strategy = ?options.strategy,
        "searching for cheapest basket"
    );

    let outcome = if store_count == 1 {
        SingleStoreSolver::new()
            .with_pruning(options.pruning)
            .solve(&problem, deadline)?
    } else {
        match options.strategy {
            SearchStrategy::Sequential => ExhaustiveSolver::new(store_count)
                .with_pruning(options.pruning)
                .solve(&problem, deadline)?,
            SearchStrategy::Parallel { threads } => {
                let solver = ParallelSolver::new(store_count).with_pruning(options.pruning);
                let solver = match threads {
                    Some(threads) => solver.with_threads(threads),
                    None => solver,
                };

                solver.solve(&problem, deadline)?
            }
        }
    };

    match &outcome {
        BasketOutcome::Found(basket) => info!(
            stores = ?basket.stores(),
            total = %basket.total(),
            "found cheapest basket"
        ),
        BasketOutcome::Infeasible => info!(store_count, "no basket covers every item"),
        BasketOutcome::PartialTimeout { evaluated, total } => {
            info!(evaluated, ?total, "search timed out before completing");
        }
    }

    Ok(outcome)
}
