//! Single-store search
//!
//! The common case of shopping at exactly one store. Loops over the store
//! universe directly instead of enumerating singleton combinations; selection
//! and tie-breaking are shared with the combination path, so both pick the
//! same basket.

use tracing::debug;

use crate::{
    combinations::combination_count,
    selector::BestBasket,
    solvers::{
        Assignment, BasketOutcome, Deadline, SearchProblem, Solver, SolverError,
        assign::assign_where,
    },
};

/// Solver for a one-store limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleStoreSolver {
    pruning: bool,
}

impl SingleStoreSolver {
    /// Create a single-store solver with pruning enabled.
    pub fn new() -> Self {
        Self { pruning: true }
    }

    /// Enable or disable branch-and-bound pruning.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

impl Default for SingleStoreSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for SingleStoreSolver {
    fn solve<'a>(
        &self,
        problem: &SearchProblem<'a>,
        deadline: Deadline,
    ) -> Result<BasketOutcome<'a>, SolverError> {
        let stores = problem.universe().stores();
        let mut best = BestBasket::new();
        let mut evaluated: u64 = 0;

        for (generation, store) in stores.iter().enumerate() {
            if deadline.expired() {
                return Ok(BasketOutcome::PartialTimeout {
                    evaluated,
                    total: combination_count(stores.len(), 1),
                });
            }

            let bound = if self.pruning { best.bound() } else { None };

            if let Assignment::Feasible(basket) =
                assign_where(problem, |retailer| retailer == *store, bound)?
            {
                best.offer(generation, basket);
            }

            evaluated += 1;
        }

        debug!(evaluated, best = ?best.bound(), "single-store search finished");

        Ok(best.into_outcome())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::solvers::{
        ExhaustiveSolver,
        test_support::{four_store_fixture, priced, two_item_fixture},
    };

    use super::*;

    #[test]
    fn cheapest_single_store_wins() -> TestResult {
        let (items, quotes) = priced(&[("milk", 2)], &[("A", "milk", 200), ("B", "milk", 150)])?;
        let problem = SearchProblem::new(&items, &quotes, USD);

        let basket = SingleStoreSolver::new()
            .solve(&problem, Deadline::none())?
            .into_basket()
            .ok_or("expected basket")?;

        assert_eq!(basket.stores(), &["B"]);
        assert_eq!(basket.total(), Money::from_minor(300, USD));

        Ok(())
    }

    #[test]
    fn only_stores_covering_everything_qualify() -> TestResult {
        let (items, quotes) = two_item_fixture()?;
        let problem = SearchProblem::new(&items, &quotes, USD);

        let basket = SingleStoreSolver::new()
            .solve(&problem, Deadline::none())?
            .into_basket()
            .ok_or("expected basket")?;

        assert_eq!(basket.stores(), &["A"]);
        assert_eq!(basket.total(), Money::from_minor(300, USD));

        Ok(())
    }

    #[test]
    fn matches_singleton_combinations() -> TestResult {
        let (items, quotes) = four_store_fixture()?;
        let problem = SearchProblem::new(&items, &quotes, USD);

        let direct = SingleStoreSolver::new().solve(&problem, Deadline::none())?;
        let generic = ExhaustiveSolver::new(1).solve(&problem, Deadline::none())?;

        assert_eq!(direct, generic);

        Ok(())
    }

    #[test]
    fn tied_stores_resolve_to_first_in_universe() -> TestResult {
        let (items, quotes) = priced(
            &[("milk", 1)],
            &[("C", "milk", 100), ("A", "milk", 100), ("B", "milk", 100)],
        )?;
        let problem = SearchProblem::new(&items, &quotes, USD);

        let basket = SingleStoreSolver::new()
            .with_pruning(false)
            .solve(&problem, Deadline::none())?
            .into_basket()
            .ok_or("expected basket")?;

        assert_eq!(basket.stores(), &["C"]);

        Ok(())
    }

    #[test]
    fn infeasible_when_no_store_has_everything() -> TestResult {
        let (items, quotes) = priced(
            &[("milk", 1), ("bread", 1)],
            &[("A", "milk", 100), ("B", "bread", 100)],
        )?;
        let problem = SearchProblem::new(&items, &quotes, USD);

        let outcome = SingleStoreSolver::new().solve(&problem, Deadline::none())?;

        assert_eq!(outcome, BasketOutcome::Infeasible);

        Ok(())
    }
}
