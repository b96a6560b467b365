//! Per-combination assignment
//!
//! For one candidate set of stores, pick the cheapest allowed quote for each
//! item. Ties go to the quote that appeared first in the input.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    basket::{Basket, ItemAssignment},
    items::GroceryItem,
    quotes::PriceQuote,
    solvers::{SearchProblem, SolverError},
    stores::StoreCombination,
};

/// Result of assigning items within one store combination.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment<'a> {
    /// Every item has an allowed quote.
    Feasible(Basket<'a>),

    /// At least one item has no quote from any store in the combination.
    Infeasible,

    /// The running cost exceeded the supplied bound before every item was
    /// assigned, so this combination cannot beat the current best.
    Pruned,
}

impl<'a> Assignment<'a> {
    /// The basket, if the combination was feasible.
    pub fn into_basket(self) -> Option<Basket<'a>> {
        match self {
            Assignment::Feasible(basket) => Some(basket),
            Assignment::Infeasible | Assignment::Pruned => None,
        }
    }
}

/// Assign every item within `combination`.
///
/// When `bound` is set, evaluation stops as soon as the running cost is
/// strictly greater than it.
///
/// # Errors
///
/// Returns a [`SolverError`] if the basket total cannot be computed.
pub fn assign<'a>(
    problem: &SearchProblem<'a>,
    combination: &StoreCombination<'_>,
    bound: Option<Decimal>,
) -> Result<Assignment<'a>, SolverError> {
    assign_where(problem, |retailer| combination.contains(retailer), bound)
}

/// Assign every item within `combination`, indexing `quotes` on the fly.
///
/// # Errors
///
/// Returns a [`SolverError`] if the basket total cannot be computed.
pub fn assign_combination<'a>(
    items: &'a [GroceryItem],
    quotes: &'a [PriceQuote],
    combination: &StoreCombination<'_>,
    currency: &'static Currency,
) -> Result<Assignment<'a>, SolverError> {
    assign(&SearchProblem::new(items, quotes, currency), combination, None)
}

/// Shared assignment loop for every solver, parameterised on which retailers are allowed.
pub(crate) fn assign_where<'a>(
    problem: &SearchProblem<'a>,
    allowed: impl Fn(&str) -> bool,
    bound: Option<Decimal>,
) -> Result<Assignment<'a>, SolverError> {
    let items = problem.items();
    let mut assignments = Vec::with_capacity(items.len());
    let mut running = Decimal::ZERO;

    for (item_idx, item) in items.iter().enumerate() {
        let Some(quote) = cheapest_quote(problem.candidates(item_idx), &allowed) else {
            return Ok(Assignment::Infeasible);
        };

        running = running
            .checked_add(*quote.line_cost().amount())
            .ok_or(SolverError::CostOverflow)?;

        if bound.is_some_and(|bound| running > bound) {
            return Ok(Assignment::Pruned);
        }

        assignments.push(ItemAssignment::new(item, quote));
    }

    Ok(Assignment::Feasible(Basket::new(
        assignments,
        problem.currency(),
    )?))
}

/// Cheapest allowed quote by line cost; the earliest wins on a tie.
fn cheapest_quote<'a>(
    candidates: &[&'a PriceQuote],
    allowed: impl Fn(&str) -> bool,
) -> Option<&'a PriceQuote> {
    candidates
        .iter()
        .copied()
        .filter(|quote| allowed(quote.retailer()))
        .min_by_key(|quote| *quote.line_cost().amount())
}
