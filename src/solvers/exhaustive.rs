//! Exhaustive combination search
//!
//! Evaluates every store combination of a fixed size in canonical order on the
//! calling thread.

use tracing::debug;

use crate::{
    combinations::{Combinations, combination_count},
    selector::BestBasket,
    solvers::{
        Assignment, BasketOutcome, Deadline, SearchProblem, Solver, SolverError, assign::assign,
    },
    stores::StoreCombination,
};

/// Sequential solver over all combinations of `store_count` stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSolver {
    store_count: usize,
    pruning: bool,
}

impl ExhaustiveSolver {
    /// Search combinations of exactly `store_count` stores.
    pub fn new(store_count: usize) -> Self {
        Self {
            store_count,
            pruning: true,
        }
    }

    /// Enable or disable branch-and-bound pruning.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

impl Solver for ExhaustiveSolver {
    fn solve<'a>(
        &self,
        problem: &SearchProblem<'a>,
        deadline: Deadline,
    ) -> Result<BasketOutcome<'a>, SolverError> {
        let stores = problem.universe().stores();
        let total = combination_count(stores.len(), self.store_count);
        let mut best = BestBasket::new();
        let mut evaluated: u64 = 0;
        let mut pruned: u64 = 0;

        for (generation, members) in Combinations::new(stores, self.store_count)?.enumerate() {
            if deadline.expired() {
                debug!(evaluated, ?total, "search deadline expired");

                return Ok(BasketOutcome::PartialTimeout { evaluated, total });
            }

            let combination = StoreCombination::new(members.into_iter().copied());
            let bound = if self.pruning { best.bound() } else { None };

            match assign(problem, &combination, bound)? {
                Assignment::Feasible(basket) => {
                    best.offer(generation, basket);
                }
                Assignment::Pruned => pruned += 1,
                Assignment::Infeasible => {}
            }

            evaluated += 1;
        }

        debug!(
            store_count = self.store_count,
            evaluated,
            pruned,
            best = ?best.bound(),
            "exhaustive search finished"
        );

        Ok(best.into_outcome())
    }
}
