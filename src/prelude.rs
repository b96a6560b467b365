//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError, ItemAssignment},
    combinations::{CombinationError, Combinations, combination_count},
    fixtures::{Fixture, FixtureError},
    items::{GroceryItem, ItemError, RawGroceryItem, validate_items},
    optimizer::{OptimizerError, SearchOptions, SearchStrategy, optimize},
    quotes::{NormalizedQuotes, PriceQuote, QuoteError, RawPriceQuote, normalize_quotes},
    raw::Scalar,
    receipt::{Receipt, ReceiptError},
    request::{BasketRequest, BasketResponse, PreparedRequest, ResponseOutcome},
    selector::BestBasket,
    solvers::{
        BasketOutcome, Deadline, ExhaustiveSolver, ParallelSolver, SearchProblem,
        SingleStoreSolver, Solver, SolverError,
    },
    stores::{StoreCombination, StoreUniverse},
};
